//! Utility modules for the snapshot gateway
//!
//! ## Module Organization
//!
//! - **error**: Error type, retry, timeout and circuit-breaker policies
//! - **logging**: Tracing subscriber bootstrap
//! - **time**: Injectable clocks

pub mod error; // Error handling
pub mod logging; // Logging bootstrap
pub mod time; // Clocks

pub use error::{GatewayError, Result};
pub use logging::init_logging;
pub use time::{Clock, ManualClock, SharedClock, SystemClock};

/// Format bytes as human readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: u64 = 1024;

    if bytes < THRESHOLD {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD as f64 && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD as f64;
        unit_index += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_index])
}
