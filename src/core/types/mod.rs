//! Core type definition module
//!
//! Contains the value types exchanged between gateways, the facade and callers

pub mod entry;
pub mod link;
pub mod metrics;
pub mod tier;

// Re-export all public types
pub use entry::*;
pub use link::*;
pub use metrics::*;
pub use tier::*;
