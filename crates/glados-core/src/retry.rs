//! Bounded retry with a fixed delay between attempts.
//!
//! Retries bound the number of attempts, not wall-clock time: a single
//! attempt may block for as long as the backend takes.

use std::future::Future;
use std::time::Duration;

/// How many times to try an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Always at least 1.
    pub max_attempts: u32,
    /// Pause between two consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            delay,
        }
    }

    /// Model activation: 5 warm-up attempts, 2 s apart.
    #[must_use]
    pub const fn connect() -> Self {
        Self::new(5, Duration::from_secs(2))
    }

    /// Chat inference: 3 attempts, 1 s apart.
    #[must_use]
    pub const fn inference() -> Self {
        Self::new(3, Duration::from_secs(1))
    }

    /// Same attempt count, no waiting. Used by tests.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// Every failure is logged with its attempt number under `label`. The last
/// error is returned when all attempts fail.
pub async fn retry_async<T, E, F, Fut>(policy: RetryPolicy, label: &str, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(operation = label, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt < policy.max_attempts => {
                tracing::warn!(
                    operation = label,
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %e,
                    "Attempt failed, retrying in {:?}",
                    policy.delay
                );
                if !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
                attempt += 1;
            }
            Err(e) => {
                tracing::warn!(
                    operation = label,
                    attempt,
                    error = %e,
                    "Final attempt failed"
                );
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn zero_attempts_means_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn default_policies() {
        assert_eq!(RetryPolicy::connect(), RetryPolicy::new(5, Duration::from_secs(2)));
        assert_eq!(RetryPolicy::inference(), RetryPolicy::new(3, Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_async(RetryPolicy::immediate(5), "test", |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(format!("fail {attempt}"))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_error_when_exhausted() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = retry_async(RetryPolicy::immediate(4), "test", |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(format!("fail {attempt}")) }
        })
        .await;

        assert_eq!(result, Err("fail 4".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_between_attempts_only() {
        let start = tokio::time::Instant::now();
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let _: Result<(), &str> = retry_async(policy, "test", |_| async { Err("nope") }).await;

        // Two pauses for three attempts.
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }
}
