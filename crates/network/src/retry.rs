// crates/network/src/retry.rs
//! Retry policies with exponential backoff

use crate::error::{NetworkError, NetworkResult};
use log::debug;
use std::future::Future;
use std::time::Duration;

/// Longest wait between two attempts
const MAX_DELAY: Duration = Duration::from_secs(10);

/// Retry policy: exponential backoff, doubling from the initial delay,
/// capped at [`MAX_DELAY`] and shortened by up to 25% jitter
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first attempt)
    max_attempts: usize,
    /// Delay after the first failed attempt
    initial_delay: Duration,
}

impl RetryPolicy {
    /// Creates a new retry policy
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::from_millis(100),
        }
    }

    /// Sets the initial delay
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Calculates the delay after a given failed attempt
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let initial_ms = u64::try_from(self.initial_delay.as_millis()).unwrap_or(u64::MAX);
        let factor = u32::try_from(attempt - 1)
            .ok()
            .and_then(|shift| 1u64.checked_shl(shift))
            .unwrap_or(u64::MAX);
        let max_ms = MAX_DELAY.as_millis() as u64;
        let capped_ms = initial_ms.saturating_mul(factor).min(max_ms);

        // 75..100% of the capped delay, varying by attempt
        let jitter_percent = 75 + (attempt as u64 * 10 % 25);
        Duration::from_millis(capped_ms * jitter_percent / 100)
    }

    /// Returns the maximum number of attempts
    pub fn max_attempts(&self) -> usize {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error,
/// or the policy's attempts run out
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> NetworkResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = NetworkResult<T>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) if attempt >= policy.max_attempts() => {
                return Err(NetworkError::RetriesExhausted {
                    attempts: attempt,
                    last_error: e.to_string(),
                });
            }
            Err(e) => {
                let delay = policy.delay_for_attempt(attempt);
                debug!("Attempt {} failed ({}), retrying in {:?}", attempt, e, delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn server_error() -> NetworkError {
        NetworkError::Status {
            url: "https://example.com/feed.xml".to_string(),
            status: 503,
        }
    }

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
    }

    #[test]
    fn test_retry_policy_builder() {
        let policy = RetryPolicy::new(5).with_initial_delay(Duration::from_millis(200));

        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.initial_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_exponential_backoff_with_jitter() {
        let policy = RetryPolicy::new(4).with_initial_delay(Duration::from_millis(100));

        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(85));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(190));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(320));
    }

    #[test]
    fn test_max_delay_capping() {
        let policy = RetryPolicy::new(100).with_initial_delay(Duration::from_secs(1));

        assert!(policy.delay_for_attempt(10) <= MAX_DELAY);
        assert!(policy.delay_for_attempt(80) <= MAX_DELAY);
        assert!(policy.delay_for_attempt(80) >= MAX_DELAY * 3 / 4);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_with_retry_success_after_failures() {
        let policy = RetryPolicy::new(3).with_initial_delay(Duration::from_millis(1));
        let calls = AtomicUsize::new(0);

        let result = with_retry(&policy, || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call < 3 {
                    Err(server_error())
                } else {
                    Ok(call)
                }
            }
        })
        .await;

        assert_eq!(result.ok(), Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_exhausted() {
        let policy = RetryPolicy::new(2).with_initial_delay(Duration::from_millis(1));

        let result: NetworkResult<()> = with_retry(&policy, || async { Err(server_error()) }).await;

        match result {
            Err(NetworkError::RetriesExhausted { attempts, last_error }) => {
                assert_eq!(attempts, 2);
                assert!(last_error.contains("503"));
            }
            other => panic!("Expected RetriesExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_with_retry_stops_on_client_error() {
        let policy = RetryPolicy::new(5).with_initial_delay(Duration::from_millis(1));
        let calls = AtomicUsize::new(0);

        let result: NetworkResult<()> = with_retry(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(NetworkError::Status {
                    url: "https://example.com/gone.xml".to_string(),
                    status: 404,
                })
            }
        })
        .await;

        assert!(matches!(result, Err(NetworkError::Status { status: 404, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
