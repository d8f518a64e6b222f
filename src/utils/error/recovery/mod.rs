//! Error recovery and resilience utilities
//!
//! This module provides the circuit breaker, retry and timeout policies that
//! protect calls to the snapshot origin.

mod circuit_breaker;
mod policy;
mod resilience;
mod retry;
mod types;

pub use circuit_breaker::{CallPermit, CircuitBreaker};
pub use policy::ReliabilityPolicy;
pub use resilience::TimeoutWrapper;
pub use retry::RetryPolicy;
pub use types::{CircuitBreakerConfig, CircuitBreakerState, CircuitState, RetryConfig};
