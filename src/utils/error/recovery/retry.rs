//! Retry mechanism with exponential backoff

use super::types::RetryConfig;
use crate::utils::error::Result;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry mechanism with exponential backoff.
///
/// Only failures for which [`GatewayError::is_retryable`] holds are retried;
/// everything else is returned from the attempt that produced it.
///
/// [`GatewayError::is_retryable`]: crate::utils::error::GatewayError::is_retryable
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Get the retry configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute a function with retry logic
    pub async fn call<F, Fut, R>(&self, mut f: F) -> Result<R>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match f().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(error) if !error.is_retryable() => return Err(error),
                Err(error) => {
                    if attempt >= max_attempts {
                        warn!("Giving up after {} attempts: {}", attempt, error);
                        return Err(error);
                    }

                    let delay = self.delay_for(attempt);
                    debug!(
                        "Attempt {} failed: {}, retrying in {:?}",
                        attempt, error, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Backoff after the given (1-based) failed attempt, without jitter
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let factor = 1u32 << exponent;
        self.config
            .base_delay
            .checked_mul(factor)
            .unwrap_or(self.config.max_delay)
            .min(self.config.max_delay)
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let delay = self.backoff_delay(attempt);
        if !self.config.jitter {
            return delay;
        }
        // Up to 10% on top of the capped delay
        delay.mul_f64(1.0 + rand::random::<f64>() * 0.1)
    }
}
