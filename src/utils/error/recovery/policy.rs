//! Composed reliability policy: circuit breaker, then retry, then per-attempt timeout

use super::circuit_breaker::CircuitBreaker;
use super::resilience::TimeoutWrapper;
use super::retry::RetryPolicy;
use super::types::{CircuitBreakerConfig, CircuitBreakerState, CircuitState, RetryConfig};
use crate::utils::error::Result;
use std::future::Future;
use std::time::Duration;

/// Wraps every remote call made by one gateway instance.
///
/// The breaker gates the whole call; the retry loop runs inside it and each
/// attempt is bounded by its own deadline. A call rejected by an open breaker
/// never reaches the retry loop.
#[derive(Debug)]
pub struct ReliabilityPolicy {
    breaker: CircuitBreaker,
    retry: RetryPolicy,
    attempt_timeout: TimeoutWrapper,
}

impl ReliabilityPolicy {
    /// Create a new policy with its own breaker state
    pub fn new(
        breaker: CircuitBreakerConfig,
        retry: RetryConfig,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            breaker: CircuitBreaker::new(breaker),
            retry: RetryPolicy::new(retry),
            attempt_timeout: TimeoutWrapper::new(attempt_timeout),
        }
    }

    /// Run `op` under the full policy. `op` is invoked once per attempt.
    pub async fn execute<F, Fut, R>(&self, mut op: F) -> Result<R>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let permit = self.breaker.try_acquire()?;
        let outcome = self
            .retry
            .call(|| self.attempt_timeout.call(op()))
            .await;
        permit.settle(&outcome);
        outcome
    }

    /// Current breaker state
    pub fn circuit_state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Breaker counters
    pub fn breaker_snapshot(&self) -> CircuitBreakerState {
        self.breaker.snapshot()
    }

    /// Per-attempt deadline
    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout.timeout()
    }
}
