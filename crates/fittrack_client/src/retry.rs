//! Retry with exponential backoff for transient progress-API failures.

use crate::ClientError;
use rand::{RngExt, rng};
use std::time::Duration;

/// Only network failures and server-side errors are worth retrying;
/// auth, not-found and validation responses will not change on a
/// second attempt.
pub fn is_transient(err: &ClientError) -> bool {
    match err {
        ClientError::Http(_) => true,
        ClientError::Api { status, .. } => *status >= 500,
        ClientError::Auth(_)
        | ClientError::NotFound(_)
        | ClientError::InvalidInput(_)
        | ClientError::Config(_)
        | ClientError::Engine(_) => false,
    }
}

/// Exponential backoff with jitter.
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Run `f` until it succeeds, the error is non-transient, or the
    /// retry budget is exhausted.
    pub async fn retry_transient<F, Fut, T>(&self, mut f: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, ClientError>>,
    {
        let mut attempt = 0u32;
        loop {
            match f().await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries || !is_transient(&e) {
                        return Err(e);
                    }
                    tracing::debug!(attempt, error = %e, "retrying transient progress api failure");
                    tokio::time::sleep(self.backoff_delay(attempt)).await;
                }
            }
        }
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let max_delay = self.base_delay * (1u32 << attempt);
        let jitter = rng().random_range(0..max_delay.as_millis().max(1) as u64);
        Duration::from_millis(jitter)
    }
}
