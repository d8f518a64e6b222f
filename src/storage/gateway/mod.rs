//! Storage gateway implementations
//!
//! This module provides the production and mock gateways and the enum that
//! dispatches to whichever one was selected at startup.

pub mod catalog;
mod dispatch;
pub mod listing;
mod mock;
mod production;
mod types;

// Re-export public types
pub use mock::MockGateway;
pub use production::ProductionGateway;
pub use types::{Gateway, GatewayKind};
