//! Retry and backoff policy.
//!
//! Classifies fetch failures (connection problems, timeouts, HTTP status
//! classes) and decides exponential backoff, so the page fetch and the
//! resource downloads share one policy.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
