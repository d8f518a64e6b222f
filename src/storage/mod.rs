//! Storage layer for the snapshot gateway
//!
//! This module provides access to the static-file origin holding the
//! snapshot archives.

/// Origin gateways
pub mod gateway;

pub use gateway::{Gateway, GatewayKind, MockGateway, ProductionGateway};
