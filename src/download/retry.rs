//! Fixed-delay retry for rate-limited (HTTP 429) image requests.
//!
//! Only 429 responses are retried. Every other failure is returned to the
//! caller on the first attempt. After [`RateLimitPolicy::max_retries`] retries
//! the request fails permanently; there is never an extra attempt.
//!
//! # Example
//!
//! ```
//! use emoji_downloader_core::download::{DownloadError, RateLimitPolicy, RetryDecision};
//!
//! let policy = RateLimitPolicy::default();
//! let error = DownloadError::http_status("https://emoji.example/a.png", 429);
//!
//! match policy.should_retry(&error, 0) {
//!     RetryDecision::Retry { delay, retry } => {
//!         println!("Retry {} in {:?}", retry, delay);
//!     }
//!     RetryDecision::DoNotRetry { reason } => {
//!         println!("Not retrying: {}", reason);
//!     }
//! }
//! ```

use std::time::Duration;

use tracing::{debug, instrument};

use super::DownloadError;

/// Default number of retries after a 429 response.
pub const DEFAULT_RATE_LIMIT_RETRIES: u32 = 5;

/// Default fixed delay between 429 retries (2 seconds).
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_secs(2);

/// Decision on whether to retry a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay.
    Retry {
        /// How long to wait before retrying.
        delay: Duration,
        /// Which retry this will be (1-indexed).
        retry: u32,
    },

    /// Do not retry.
    DoNotRetry {
        /// Human-readable reason why retry is not attempted.
        reason: String,
    },
}

/// Retry policy for rate-limited requests.
///
/// # Default Values
///
/// - `max_retries`: 5
/// - `delay`: 2 seconds (fixed, no backoff growth or jitter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Retries allowed after the initial request.
    max_retries: u32,

    /// Fixed wait before each retry.
    delay: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_RATE_LIMIT_RETRIES,
            delay: DEFAULT_RATE_LIMIT_DELAY,
        }
    }
}

impl RateLimitPolicy {
    /// Creates a policy with custom settings.
    ///
    /// `max_retries = 0` disables retrying: the first 429 is final.
    #[must_use]
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Returns the configured retry limit.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Determines whether to retry after `error`.
    ///
    /// # Arguments
    ///
    /// * `error` - The failure from the most recent attempt
    /// * `retries_done` - Retries already performed (0 after the initial request)
    #[instrument(skip(self, error), fields(max_retries = self.max_retries))]
    pub fn should_retry(&self, error: &DownloadError, retries_done: u32) -> RetryDecision {
        if !error.is_rate_limited() {
            return RetryDecision::DoNotRetry {
                reason: "only HTTP 429 responses are retried".to_string(),
            };
        }

        if retries_done >= self.max_retries {
            debug!(retries_done, max = self.max_retries, "rate limit retries exhausted");
            return RetryDecision::DoNotRetry {
                reason: format!("max retries ({}) exhausted", self.max_retries),
            };
        }

        debug!(
            retry = retries_done + 1,
            delay_ms = self.delay.as_millis(),
            "will retry rate-limited request"
        );

        RetryDecision::Retry {
            delay: self.delay,
            retry: retries_done + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_limited() -> DownloadError {
        DownloadError::http_status("https://emoji.example/a.png", 429)
    }

    #[test]
    fn test_policy_default_values() {
        let policy = RateLimitPolicy::default();
        assert_eq!(policy.max_retries(), 5);
        assert_eq!(policy, RateLimitPolicy::new(5, Duration::from_secs(2)));
    }

    #[test]
    fn test_policy_custom() {
        let policy = RateLimitPolicy::new(2, Duration::from_millis(10));
        assert_eq!(policy.max_retries(), 2);
        assert_eq!(
            policy.should_retry(&rate_limited(), 0),
            RetryDecision::Retry {
                delay: Duration::from_millis(10),
                retry: 1,
            }
        );
    }

    #[test]
    fn test_should_retry_429_with_fixed_delay() {
        let policy = RateLimitPolicy::default();
        for done in 0..5 {
            assert_eq!(
                policy.should_retry(&rate_limited(), done),
                RetryDecision::Retry {
                    delay: Duration::from_secs(2),
                    retry: done + 1,
                }
            );
        }
    }

    #[test]
    fn test_should_retry_stops_after_fifth_retry() {
        let policy = RateLimitPolicy::default();
        let decision = policy.should_retry(&rate_limited(), 5);
        assert!(matches!(decision, RetryDecision::DoNotRetry { .. }));
        if let RetryDecision::DoNotRetry { reason } = decision {
            assert!(reason.contains("exhausted"));
        }
    }

    #[test]
    fn test_should_retry_zero_retries_policy() {
        let policy = RateLimitPolicy::new(0, Duration::ZERO);
        assert!(matches!(
            policy.should_retry(&rate_limited(), 0),
            RetryDecision::DoNotRetry { .. }
        ));
    }

    #[test]
    fn test_should_not_retry_other_statuses() {
        let policy = RateLimitPolicy::default();
        for status in [400, 403, 404, 500, 503] {
            let error = DownloadError::http_status("https://emoji.example/a.png", status);
            assert!(
                matches!(
                    policy.should_retry(&error, 0),
                    RetryDecision::DoNotRetry { .. }
                ),
                "status {status} must not be retried"
            );
        }
    }

    #[test]
    fn test_should_not_retry_timeout() {
        let policy = RateLimitPolicy::default();
        let error = DownloadError::timeout("https://emoji.example/a.png");
        assert!(matches!(
            policy.should_retry(&error, 0),
            RetryDecision::DoNotRetry { .. }
        ));
    }
}
