//! Page assembly: fetch, resolve, rewrite, save, download resources.
//!
//! The run is linear. Failures before and including the document write abort
//! the load with a [`LoadPageError`]; individual resource failures are logged,
//! recorded in the [`ResourceReport`] and skipped.

mod resources;

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use url::Url;

use crate::error::LoadPageError;
use crate::fetch::{fetch_with_retry, CurlFetcher, Fetch};
use crate::html;
use crate::resolver::resolve;
use crate::retry::RetryPolicy;
use crate::storage::{self, assert_writable_directory, DirectoryError};
use crate::url_model::{to_dir_name, to_file_name, DEFAULT_EXTENSION};

pub use resources::{FailedResource, ResourceProgress, ResourceReport, SavedResource};

/// Knobs for one page load.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Applied to the page and to every resource.
    pub retry: RetryPolicy,
    /// Resources downloaded at once; 1 downloads them one after another.
    pub max_concurrent_downloads: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            max_concurrent_downloads: 1,
        }
    }
}

/// Outcome of a successful load.
#[derive(Debug)]
pub struct LoadedPage {
    /// Absolute path of the saved document.
    pub html_path: PathBuf,
    /// Absolute path of the resource directory (exists only if a resource was saved).
    pub resource_dir: PathBuf,
    pub resources: ResourceReport,
}

/// Saves one page and its local resources into a directory.
pub struct PageLoader<F: Fetch> {
    fetcher: F,
    options: LoaderOptions,
    progress_tx: Option<mpsc::Sender<ResourceProgress>>,
}

impl PageLoader<CurlFetcher> {
    /// Loader with the libcurl fetcher and default options.
    pub fn with_defaults() -> Self {
        PageLoader::new(CurlFetcher::default(), LoaderOptions::default())
    }
}

impl<F: Fetch> PageLoader<F> {
    pub fn new(fetcher: F, options: LoaderOptions) -> Self {
        Self {
            fetcher,
            options,
            progress_tx: None,
        }
    }

    /// Sends one [`ResourceProgress`] per finished resource.
    pub fn with_progress(mut self, tx: mpsc::Sender<ResourceProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Downloads `page_url` into `output_dir`.
    ///
    /// The document is saved as `<slug>.html` and its local resources under
    /// `<slug>_files/`. The directory is checked before any network call.
    pub fn download(&self, page_url: &str, output_dir: &Path) -> Result<LoadedPage, LoadPageError> {
        tracing::info!("start loading web page `{}` to `{}`", page_url, output_dir.display());

        let url = parse_page_url(page_url)?;
        let output_dir = absolute_dir(output_dir)?;
        assert_writable_directory(&output_dir)?;

        let response = fetch_with_retry(&self.fetcher, url.as_str(), &self.options.retry)
            .map_err(|source| LoadPageError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let found = html::extract(&response.body)?;
        let map = resolve(&url, &found);
        tracing::info!(resources = map.len(), "resolved local resources");
        let document = html::rewrite(&response.body, &map)?;

        let html_path = output_dir.join(to_file_name(url.as_str(), Some(DEFAULT_EXTENSION)));
        let written = storage::store(&html_path, &document).map_err(|source| {
            LoadPageError::Storage {
                path: html_path.clone(),
                source,
            }
        })?;
        tracing::info!(bytes = written, "saved page `{}`", html_path.display());

        let report = resources::download_resources(
            &self.fetcher,
            &output_dir,
            &map,
            &self.options,
            self.progress_tx.as_ref(),
        );
        if !report.failed.is_empty() {
            tracing::warn!(
                failed = report.failed.len(),
                saved = report.saved.len(),
                "some resources were not saved"
            );
        }

        tracing::info!("web page loaded `{}` -> `{}`", url, html_path.display());
        Ok(LoadedPage {
            html_path,
            resource_dir: output_dir.join(to_dir_name(url.as_str())),
            resources: report,
        })
    }
}

/// Downloads `page_url` into `output_dir` with the default loader.
pub fn download(page_url: &str, output_dir: &Path) -> Result<LoadedPage, LoadPageError> {
    PageLoader::with_defaults().download(page_url, output_dir)
}

/// Accepts absolute `http`/`https` URLs with a host.
fn parse_page_url(raw: &str) -> Result<Url, LoadPageError> {
    let invalid = |reason: &str| LoadPageError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("only http and https are supported"));
    }
    Ok(url)
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, DirectoryError> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .map_err(|_| DirectoryError::NotFound(dir.to_path_buf()))
}
