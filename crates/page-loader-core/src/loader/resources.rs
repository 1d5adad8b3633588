//! Resource downloads after the document is saved.
//!
//! Each resource is fetched and stored on its own: a failure is logged and
//! recorded, never propagated. With `max_concurrent_downloads > 1` a fixed set
//! of worker threads drains a shared queue; the report is put back into
//! rewrite-map order before it is returned.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{mpsc, Mutex};

use crate::error::ResourceError;
use crate::fetch::{fetch_with_retry, Fetch};
use crate::resolver::{ResolvedResource, RewriteMap};
use crate::retry::RetryPolicy;
use crate::storage;

use super::LoaderOptions;

/// Sent after each resource finishes, successfully or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceProgress {
    /// Resources finished so far, this one included.
    pub done: usize,
    pub total: usize,
    pub url: String,
    pub saved: bool,
}

#[derive(Debug)]
pub struct SavedResource {
    pub resource: ResolvedResource,
    pub bytes: u64,
}

#[derive(Debug)]
pub struct FailedResource {
    pub resource: ResolvedResource,
    pub error: ResourceError,
}

/// What happened to every resolved resource, in rewrite-map order.
#[derive(Debug, Default)]
pub struct ResourceReport {
    pub saved: Vec<SavedResource>,
    pub failed: Vec<FailedResource>,
}

type Outcome = Result<u64, ResourceError>;

pub(super) fn download_resources(
    fetcher: &dyn Fetch,
    output_dir: &Path,
    map: &RewriteMap,
    options: &LoaderOptions,
    progress_tx: Option<&mpsc::Sender<ResourceProgress>>,
) -> ResourceReport {
    let resources: Vec<&ResolvedResource> = map.iter().collect();
    let total = resources.len();
    if total == 0 {
        return ResourceReport::default();
    }

    let mut done = 0usize;
    let mut on_finished = |resource: &ResolvedResource, outcome: &Outcome| {
        done += 1;
        if let Err(e) = outcome {
            tracing::warn!("skipping resource: {}", e);
        }
        if let Some(tx) = progress_tx {
            let _ = tx.send(ResourceProgress {
                done,
                total,
                url: resource.url.to_string(),
                saved: outcome.is_ok(),
            });
        }
    };

    let workers = options.max_concurrent_downloads.clamp(1, total);
    let mut outcomes: Vec<(usize, Outcome)> = if workers == 1 {
        resources
            .iter()
            .copied()
            .enumerate()
            .map(|(index, resource)| {
                let outcome = download_one(fetcher, output_dir, resource, &options.retry);
                on_finished(resource, &outcome);
                (index, outcome)
            })
            .collect()
    } else {
        let work: Mutex<VecDeque<(usize, &ResolvedResource)>> =
            Mutex::new(resources.iter().copied().enumerate().collect());
        let (tx, rx) = mpsc::channel();
        std::thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let work = &work;
                let policy = options.retry;
                scope.spawn(move || loop {
                    let next = work
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .pop_front();
                    let Some((index, resource)) = next else {
                        break;
                    };
                    let outcome = download_one(fetcher, output_dir, resource, &policy);
                    if tx.send((index, outcome)).is_err() {
                        break;
                    }
                });
            }
            drop(tx);
            let mut collected = Vec::with_capacity(total);
            for (index, outcome) in rx {
                on_finished(resources[index], &outcome);
                collected.push((index, outcome));
            }
            collected
        })
    };

    outcomes.sort_by_key(|(index, _)| *index);
    let mut report = ResourceReport::default();
    for (index, outcome) in outcomes {
        let resource = resources[index].clone();
        match outcome {
            Ok(bytes) => report.saved.push(SavedResource { resource, bytes }),
            Err(error) => report.failed.push(FailedResource { resource, error }),
        }
    }
    report
}

/// Fetches one resource and stores it under `output_dir`.
/// Storage failures are treated like fetch failures: the resource is skipped.
fn download_one(
    fetcher: &dyn Fetch,
    output_dir: &Path,
    resource: &ResolvedResource,
    policy: &RetryPolicy,
) -> Outcome {
    tracing::info!("start loading resource `{}`", resource.url);

    let response = fetch_with_retry(fetcher, resource.url.as_str(), policy).map_err(|source| {
        ResourceError::Fetch {
            url: resource.url.to_string(),
            source,
        }
    })?;

    let path = output_dir.join(&resource.path);
    let bytes = storage::store(&path, &response.body).map_err(|source| ResourceError::Storage {
        path: path.clone(),
        source,
    })?;

    tracing::info!(bytes, "resource loaded `{}` -> `{}`", resource.url, path.display());
    Ok(bytes)
}
