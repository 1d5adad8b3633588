//! HTTP GET for the page and its resources.
//!
//! Uses the curl crate (libcurl). The loader only depends on the [`Fetch`]
//! trait, so tests can substitute an in-memory fetcher.

mod parse;

use std::time::Duration;

use crate::retry::{run_with_retry, FetchError, RetryPolicy};

/// A successful (2xx) response with its full body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub reason: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs one GET. Non-2xx final statuses are returned as
/// [`FetchError::Http`] so callers can classify them.
pub trait Fetch: Send + Sync {
    fn get(&self, url: &str) -> Result<Response, FetchError>;
}

/// Transfer settings for [`CurlFetcher`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Upper bound for one whole request, body included.
    pub request_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: format!("page-loader/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// [`Fetch`] backed by a fresh libcurl easy handle per request.
/// Follows up to 10 redirects.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }
}

impl Fetch for CurlFetcher {
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.options.user_agent)?;
        // Empty string enables every encoding libcurl was built with.
        easy.accept_encoding("")?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.request_timeout)?;
        easy.low_speed_limit(1)?;
        easy.low_speed_time(Duration::from_secs(60))?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                headers.push(parse::decode_header_line(data));
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let head = parse::parse_headers(&headers);
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                status,
                reason: head.reason,
            });
        }

        tracing::debug!(url, status, bytes = body.len(), "GET complete");
        Ok(Response {
            status,
            reason: head.reason,
            content_type: head.content_type,
            body,
        })
    }
}

/// GET with the shared retry policy: connection errors, timeouts and 5xx are
/// retried with exponential backoff; everything else fails immediately.
pub fn fetch_with_retry(
    fetcher: &dyn Fetch,
    url: &str,
    policy: &RetryPolicy,
) -> Result<Response, FetchError> {
    run_with_retry(policy, || fetcher.get(url))
}
