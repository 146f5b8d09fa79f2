//! Retry Policy
//!
//! Classification-driven retry with exponential backoff and random jitter.
//! Only error categories marked retryable (network, transient, rate limit)
//! trigger another attempt; auth and bad-request failures fail fast.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::constants::retry as retry_constants;
use crate::types::{AquaError, Result};

/// Retry policy for generation calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts, first try included
    pub max_attempts: u32,
    /// Base delay for exponential backoff
    pub base_delay: Duration,
    /// Cap on any single delay, including service-suggested waits
    pub max_delay: Duration,
    /// Backoff multiplier
    pub backoff_factor: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry_constants::DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(retry_constants::BASE_DELAY_MS),
            max_delay: Duration::from_secs(retry_constants::MAX_DELAY_SECS),
            backoff_factor: retry_constants::BACKOFF_FACTOR,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Delay before the next attempt after a failed one.
    ///
    /// Uses the error's suggested wait when it has one (rate limiting),
    /// otherwise exponential backoff with jitter. Either way capped at
    /// `max_delay`.
    fn delay_for(&self, attempt: u32, error: &AquaError) -> Duration {
        let backoff_ms = self.base_delay.as_millis() as f64
            * f64::from(self.backoff_factor).powi(attempt.saturating_sub(1) as i32);
        let jittered_ms = backoff_ms * rand::rng().random_range(0.5..1.0);
        let delay = error
            .recommended_delay()
            .unwrap_or_else(|| Duration::from_millis(jittered_ms as u64));
        delay.min(self.max_delay)
    }

    /// Run an operation with retries
    pub async fn run<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts && err.is_retryable() => {
                    let delay = self.delay_for(attempt, &err);
                    warn!(
                        "{} failed (attempt {}/{}), retrying in {:?}: {}",
                        operation_name, attempt, self.max_attempts, delay, err
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    debug!(
                        "{} failed permanently after {} attempt(s): {}",
                        operation_name, attempt, err
                    );
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorCategory, GenerationError};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_factor: 2.0,
        }
    }

    fn transient_error() -> AquaError {
        AquaError::Generation(
            GenerationError::new(ErrorCategory::Transient, "overloaded")
                .retry_after(Duration::from_millis(1)),
        )
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = fast_policy(3)
            .run("test", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(transient_error())
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_auth_error_fails_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fast_policy(3)
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(AquaError::Generation(GenerationError::new(
                        ErrorCategory::Auth,
                        "bad key",
                    )))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fast_policy(3)
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(transient_error()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_none_policy_single_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::none()
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(transient_error()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delay_capped_at_max() {
        let policy = fast_policy(3);
        let rate_limited = AquaError::Generation(
            GenerationError::new(ErrorCategory::RateLimit, "slow down")
                .retry_after(Duration::from_secs(60)),
        );
        assert!(policy.delay_for(1, &rate_limited) <= policy.max_delay);
    }
}
