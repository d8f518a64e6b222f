//! Error Handling utilities
//!
//! This module provides the gateway error type and the recovery policies that
//! decide how origin failures are retried, timed out and isolated.

pub mod error;
pub mod recovery;

// Re-export commonly used types
pub use error::*;
pub use recovery::*;
