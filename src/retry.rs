use std::future::Future;
use std::time::Duration;

/// How hard to try against a flaky service: a bounded number of attempts with
/// a fixed pause in between. No exponential growth; the services this crate
/// talks to rate-limit with flat windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: usize, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }
}

/// Runs the operation until it succeeds or the policy is exhausted, returning
/// the last error in the latter case.
pub(crate) async fn with_retries<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> crate::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = crate::Result<T>>,
{
    let mut attempt = 0usize;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    target: crate::LOGGER_MSG,
                    "Attempt {}/{} failed: {}. Retrying in {} seconds...",
                    attempt,
                    policy.max_attempts,
                    err,
                    policy.backoff.as_secs()
                );
                tokio::time::sleep(policy.backoff).await;
            }
        }
    }
}
