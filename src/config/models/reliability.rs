//! Retry and circuit-breaker thresholds for origin calls

use super::*;
use crate::utils::error::{CircuitBreakerConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reliability thresholds applied by the production gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReliabilityConfig {
    /// Total attempts per call, first attempt included
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay before the second attempt, in milliseconds
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Backoff cap, in milliseconds
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
    /// Add up to 10% jitter to each backoff
    #[serde(default = "default_true")]
    pub retry_jitter: bool,
    /// Consecutive failed calls that open the circuit
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// How long the circuit stays open before a trial call, in milliseconds
    #[serde(default = "default_reset_timeout_ms")]
    pub reset_timeout_ms: u64,
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            retry_jitter: true,
            failure_threshold: default_failure_threshold(),
            reset_timeout_ms: default_reset_timeout_ms(),
        }
    }
}

impl ReliabilityConfig {
    /// Retry policy settings
    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.retry_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
            jitter: self.retry_jitter,
        }
    }

    /// Circuit breaker settings
    pub fn circuit_breaker(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: self.failure_threshold,
            reset_timeout: Duration::from_millis(self.reset_timeout_ms),
        }
    }
}
