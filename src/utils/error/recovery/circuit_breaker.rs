//! Circuit breaker implementation for fault tolerance

use super::types::{CircuitBreakerConfig, CircuitBreakerState, CircuitState};
use crate::utils::error::{GatewayError, Result};
use parking_lot::Mutex;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    last_failure_at: Option<Instant>,
    trial_in_flight: bool,
}

/// Consecutive-failure circuit breaker.
///
/// State transitions happen under a single lock so a counter update and the
/// transition it causes are never observed separately.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerInner>,
}

/// Admission ticket handed out by [`CircuitBreaker::try_acquire`].
///
/// Dropping it without settling (e.g. the caller was cancelled) frees the
/// half-open trial slot and records nothing.
#[derive(Debug)]
pub struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    trial: bool,
    settled: bool,
}

impl CallPermit<'_> {
    /// Whether this permit is the single half-open trial
    pub fn is_trial(&self) -> bool {
        self.trial
    }

    /// Record a successful call
    pub fn succeed(mut self) {
        self.settled = true;
        self.breaker.on_success(self.trial);
    }

    /// Record a failed call
    pub fn fail(mut self) {
        self.settled = true;
        self.breaker.on_failure(self.trial);
    }

    /// Settle according to the outcome of the protected call
    pub fn settle<T>(self, outcome: &Result<T>) {
        match outcome {
            Err(e) if e.counts_against_origin() => self.fail(),
            // The origin answered, even if the answer was a client error
            _ => self.succeed(),
        }
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if !self.settled && self.trial {
            debug!("Half-open trial abandoned, releasing trial slot");
            self.breaker.inner.lock().trial_in_flight = false;
        }
    }
}

impl CircuitBreaker {
    /// Create a new circuit breaker
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failure_count: 0,
                last_failure_at: None,
                trial_in_flight: false,
            }),
        }
    }

    /// Execute a future with circuit breaker protection.
    ///
    /// The future is not polled at all when the circuit rejects the call.
    pub async fn call<F, R>(&self, f: F) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        let permit = self.try_acquire()?;
        let outcome = f.await;
        permit.settle(&outcome);
        outcome
    }

    /// Ask the breaker whether a call may proceed
    pub fn try_acquire(&self) -> Result<CallPermit<'_>> {
        let mut inner = self.inner.lock();

        let trial = match inner.state {
            CircuitState::Closed => false,
            CircuitState::Open => {
                let cooled_down = inner
                    .last_failure_at
                    .is_some_and(|at| at.elapsed() >= self.config.reset_timeout);
                if !cooled_down {
                    return Err(GatewayError::circuit_open(format!(
                        "origin rejected after {} consecutive failures",
                        inner.failure_count
                    )));
                }
                debug!("Circuit breaker transitioning from Open to HalfOpen");
                inner.state = CircuitState::HalfOpen;
                inner.trial_in_flight = true;
                true
            }
            CircuitState::HalfOpen => {
                if inner.trial_in_flight {
                    return Err(GatewayError::circuit_open(
                        "half-open trial already in flight",
                    ));
                }
                inner.trial_in_flight = true;
                true
            }
        };

        Ok(CallPermit {
            breaker: self,
            trial,
            settled: false,
        })
    }

    fn on_success(&self, trial: bool) {
        let mut inner = self.inner.lock();
        if !trial && inner.state != CircuitState::Closed {
            // Admitted before the circuit opened; only the trial may close it
            debug!("Ignoring late success while circuit is {}", inner.state);
            return;
        }
        if inner.state != CircuitState::Closed {
            debug!("Circuit breaker transitioning from {} to Closed", inner.state);
        }
        inner.state = CircuitState::Closed;
        inner.failure_count = 0;
        inner.trial_in_flight = false;
    }

    fn on_failure(&self, trial: bool) {
        let mut inner = self.inner.lock();

        if trial {
            debug!("Circuit breaker transitioning from HalfOpen to Open due to failure");
            inner.failure_count = inner.failure_count.saturating_add(1);
            inner.last_failure_at = Some(Instant::now());
            inner.state = CircuitState::Open;
            inner.trial_in_flight = false;
            return;
        }

        if inner.state != CircuitState::Closed {
            // Late failure from before the circuit opened; the open timer keeps running
            debug!("Ignoring late failure while circuit is {}", inner.state);
            return;
        }

        inner.failure_count = inner.failure_count.saturating_add(1);
        inner.last_failure_at = Some(Instant::now());
        if inner.failure_count >= self.config.failure_threshold {
            warn!(
                "Circuit breaker opening after {} consecutive failures",
                inner.failure_count
            );
            inner.state = CircuitState::Open;
        }
    }

    /// Get current circuit breaker state
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    /// Get a snapshot of the breaker's counters
    pub fn snapshot(&self) -> CircuitBreakerState {
        let inner = self.inner.lock();
        CircuitBreakerState {
            failure_count: inner.failure_count,
            last_failure_at: inner.last_failure_at,
            state: inner.state,
        }
    }

    /// Get the breaker configuration
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }
}
