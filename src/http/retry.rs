//! Retry Policy
//!
//! Exponential backoff with additive random jitter, independent of any
//! particular transport.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

// == Retry Policy ==
/// How often and how patiently a failed operation is retried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each one after
    pub base_delay: Duration,
    /// Upper bound of the random extra delay, as a fraction of the backoff
    pub jitter: f64,
}

impl RetryPolicy {
    /// Creates a policy; `jitter` is clamped to `0.0..=1.0`.
    pub fn new(max_retries: u32, base_delay: Duration, jitter: f64) -> Self {
        let jitter = if jitter.is_finite() {
            jitter.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            max_retries,
            base_delay,
            jitter,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO, 0.0)
    }

    // == Backoff ==
    /// Backoff before retry number `retry` (zero-based), without jitter.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Backoff before retry number `retry` with jitter applied.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let backoff = self.backoff(retry);
        if self.jitter == 0.0 {
            return backoff;
        }
        let extra = rand::thread_rng().gen_range(0.0..=self.jitter);
        backoff.mul_f64(1.0 + extra)
    }

    // == Run ==
    /// Runs `operation` until it succeeds, fails with an error `is_retryable`
    /// rejects, or the retry budget is spent. The last error is returned.
    ///
    /// `operation` receives the zero-based attempt number.
    pub async fn run<T, E, F, Fut, P>(&self, mut operation: F, is_retryable: P) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_retries && is_retryable(&err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "transient failure, retrying: {}",
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    /// Two retries starting at one second, with up to 30% jitter.
    fn default() -> Self {
        Self::new(2, Duration::from_secs(1), 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn is_transient(err: &TestError) -> bool {
        *err == TestError::Transient
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_secs(1));
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_saturates() {
        let policy = RetryPolicy::default();
        assert!(policy.backoff(64) >= policy.backoff(31));
    }

    #[test]
    fn test_delay_jitter_bounds() {
        let policy = RetryPolicy::default();
        for _ in 0..200 {
            let delay = policy.delay_for(1);
            assert!(delay >= Duration::from_secs(2));
            assert!(delay <= Duration::from_millis(2600));
        }
    }

    #[test]
    fn test_jitter_clamped() {
        assert_eq!(RetryPolicy::new(1, Duration::ZERO, 4.0).jitter, 1.0);
        assert_eq!(RetryPolicy::new(1, Duration::ZERO, -1.0).jitter, 0.0);
        assert_eq!(RetryPolicy::new(1, Duration::ZERO, f64::NAN).jitter, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_two_transient_failures() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result = policy
            .run(
                |_| async {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(TestError::Transient)
                    } else {
                        Ok("done")
                    }
                },
                is_transient,
            )
            .await;

        let elapsed = started.elapsed();
        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1s + 2s of backoff, each stretched by at most 30%
        assert!(elapsed >= Duration::from_secs(3), "elapsed {:?}", elapsed);
        assert!(elapsed <= Duration::from_millis(3900), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_is_not_retried() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: Result<(), _> = policy
            .run(
                |_| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Permanent)
                },
                is_transient,
            )
            .await;

        assert_eq!(result, Err(TestError::Permanent));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_error_after_exhausting_retries() {
        let policy = RetryPolicy::default();
        let attempts = std::sync::Mutex::new(Vec::new());

        let result: Result<(), _> = policy
            .run(
                |attempt| {
                    attempts.lock().unwrap().push(attempt);
                    async { Err(TestError::Transient) }
                },
                is_transient,
            )
            .await;

        assert_eq!(result, Err(TestError::Transient));
        assert_eq!(*attempts.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_no_retry_policy() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = RetryPolicy::none()
            .run(
                |_| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Transient)
                },
                is_transient,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
