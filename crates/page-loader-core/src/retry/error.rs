//! Fetch error type for retry classification.

use std::fmt;

/// Error returned by a single HTTP GET (curl failure or non-2xx status).
/// Kept separate from the page-level error so the retry loop can classify it.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection refused, DNS, etc.).
    Curl(curl::Error),
    /// Final response (after redirects) had a non-2xx status.
    Http { status: u32, reason: String },
}

impl FetchError {
    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Curl(_) => None,
            FetchError::Http { status, .. } => Some(*status),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http { status, reason } => {
                let class = match status {
                    300..=399 => "Redirect",
                    400..=499 => "Client Error",
                    500..=599 => "Server Error",
                    _ => "Unexpected Status",
                };
                if reason.is_empty() {
                    write!(f, "HTTP {} {}", status, class)
                } else {
                    write!(f, "HTTP {} {}: {}", status, class, reason)
                }
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Http { .. } => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_status_class() {
        let e = FetchError::Http {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP 404 Client Error: Not Found");
        let e = FetchError::Http {
            status: 503,
            reason: String::new(),
        };
        assert_eq!(e.to_string(), "HTTP 503 Server Error");
        assert_eq!(e.status(), Some(503));
    }
}
