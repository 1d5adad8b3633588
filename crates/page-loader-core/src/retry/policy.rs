use std::time::Duration;

/// High-level classification of an error for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection refused/reset, DNS, etc.).
    Connection,
    /// Server-side HTTP status (5xx).
    Http5xx(u16),
    /// Redirect that was not followed to a final response (3xx).
    Redirect(u16),
    /// Client-side HTTP status (4xx).
    Client(u16),
    /// Any other error.
    Other,
}

impl ErrorKind {
    /// Connection problems, timeouts and server errors may succeed on a later
    /// attempt; redirects and client errors are terminal for the request.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Http5xx(_)
        )
    }
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff policy: the delay doubles after every failed attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Compute the next backoff delay for a given attempt and error kind.
    ///
    /// `attempt` is 1-based (1 = first attempt). Returns `RetryDecision::NoRetry`
    /// when we should stop retrying.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts || !kind.is_retryable() {
            return RetryDecision::NoRetry;
        }
        // base * 2^(attempt-1), capped.
        let exp = 1u32 << attempt.saturating_sub(1).min(16);
        let delay = self.base_delay.saturating_mul(exp).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_retry_for_client_redirect_and_other() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1, ErrorKind::Other), RetryDecision::NoRetry);
        assert_eq!(p.decide(1, ErrorKind::Client(404)), RetryDecision::NoRetry);
        assert_eq!(p.decide(1, ErrorKind::Redirect(301)), RetryDecision::NoRetry);
    }

    #[test]
    fn delay_doubles_from_base() {
        let p = RetryPolicy::default();
        assert_eq!(
            p.decide(1, ErrorKind::Connection),
            RetryDecision::RetryAfter(Duration::from_secs(2))
        );
        assert_eq!(
            p.decide(2, ErrorKind::Http5xx(502)),
            RetryDecision::RetryAfter(Duration::from_secs(4))
        );
    }

    #[test]
    fn backoff_is_capped() {
        let mut p = RetryPolicy::default();
        p.max_attempts = 40;
        match p.decide(30, ErrorKind::Timeout) {
            RetryDecision::RetryAfter(d) => assert_eq!(d, p.max_delay),
            other => panic!("expected retry, got {:?}", other),
        }
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy::default();
        assert!(matches!(
            p.decide(2, ErrorKind::Connection),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(p.decide(3, ErrorKind::Connection), RetryDecision::NoRetry);
        let single = RetryPolicy {
            max_attempts: 1,
            ..RetryPolicy::default()
        };
        assert_eq!(single.decide(1, ErrorKind::Connection), RetryDecision::NoRetry);
    }
}
