//! Error handling for the gateway
//!
//! This module defines all error types used throughout the gateway.

mod conversions;
mod helpers;
mod types;

pub use types::{GatewayError, Result};
