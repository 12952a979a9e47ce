//! Bounded exponential-backoff retry policy for rate-limited endpoints.
//!
//! Only HTTP 429 is retried; every other failure is treated as "not found"
//! by the callers and never aborts a batch.

use reqwest::StatusCode;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first request.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retrying after the given zero-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.pow(attempt)
    }

    /// Whether a response status warrants a retry.
    pub fn is_retryable(&self, status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS
    }

    /// Whether another attempt remains after the given zero-based attempt.
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_only_rate_limit_is_retryable() {
        let policy = RetryPolicy::default();
        assert!(policy.is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(!policy.is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!policy.is_retryable(StatusCode::NOT_FOUND));
        assert!(!policy.is_retryable(StatusCode::OK));
    }

    #[test]
    fn test_attempt_budget() {
        let policy = RetryPolicy::default();
        assert!(policy.has_attempts_left(0));
        assert!(policy.has_attempts_left(1));
        assert!(!policy.has_attempts_left(2));
    }
}
