//! Rate-limit backoff.
//!
//! Only [`ProviderError::RateLimit`] is retried; every other error class
//! surfaces immediately so the dispatcher can move on to the next
//! provider in the chain.

use std::future::Future;
use std::time::Duration;
use tcore::ProviderError;
use tokio::time::sleep;

/// Retry policy for rate-limited calls: up to `max_attempts` tries with
/// linearly growing waits between them.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Total attempts per provider, including the first.
    pub max_attempts: u32,
    /// Base wait; attempt `n` waits `base * n` before retrying.
    pub base: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base: Duration::from_secs(2),
        }
    }
}

impl BackoffPolicy {
    /// Run `call` until it succeeds, fails with a non-retryable error, or
    /// the attempt budget is spent.
    pub async fn run<T, F, Fut>(&self, mut call: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Err(ProviderError::RateLimit) if attempt < self.max_attempts => {
                    let wait = self.base * attempt;
                    tracing::warn!(attempt, ?wait, "rate limited, backing off");
                    sleep(wait).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
