//! Configuration data models
//!
//! This module defines all configuration structures used by the gateway.

pub mod logging;
pub mod mock;
pub mod origin;
pub mod registry;
pub mod reliability;
pub mod signing;

// Re-export all configuration types
pub use logging::*;
pub use mock::*;
pub use origin::*;
pub use registry::*;
pub use reliability::*;
pub use signing::*;

/// Default origin host
pub fn default_origin_host() -> String {
    "localhost".to_string()
}

/// Default origin port
pub fn default_origin_port() -> u16 {
    8080
}

/// Default per-attempt timeout in milliseconds
pub fn default_timeout_ms() -> u64 {
    30_000
}

/// Default health-probe timeout in milliseconds
pub fn default_health_timeout_ms() -> u64 {
    5_000
}

/// Default total attempts per origin call
pub fn default_retry_attempts() -> u32 {
    3
}

/// Default first backoff in milliseconds
pub fn default_retry_base_delay_ms() -> u64 {
    1_000
}

/// Default backoff cap in milliseconds
pub fn default_retry_max_delay_ms() -> u64 {
    10_000
}

/// Default consecutive failures that open the circuit
pub fn default_failure_threshold() -> u32 {
    5
}

/// Default open-circuit cool-down in milliseconds
pub fn default_reset_timeout_ms() -> u64 {
    60_000
}

/// Default fallback health-check budget in milliseconds
pub fn default_fallback_timeout_ms() -> u64 {
    5_000
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_mock_seed() -> u64 {
    0x5eed_cafe
}
