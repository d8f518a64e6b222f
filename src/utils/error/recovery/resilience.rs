//! Timeout protection for single origin attempts

use crate::utils::error::{GatewayError, Result};
use std::future::Future;
use std::time::Duration;

/// Timeout wrapper for async operations
#[derive(Debug, Clone, Copy)]
pub struct TimeoutWrapper {
    timeout: Duration,
}

impl TimeoutWrapper {
    /// Create a new timeout wrapper
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// The configured deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute a fallible future with timeout protection.
    ///
    /// On expiry the inner future is dropped, which aborts the in-flight request.
    pub async fn call<F, R>(&self, f: F) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        match tokio::time::timeout(self.timeout, f).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout(format!(
                "Operation timed out after {:?}",
                self.timeout
            ))),
        }
    }
}
