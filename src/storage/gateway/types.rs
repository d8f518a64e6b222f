//! Gateway implementation enum

use super::{MockGateway, ProductionGateway};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The gateway chosen at startup
#[derive(Debug)]
pub enum Gateway {
    /// Real origin behind retry, breaker and timeout policies
    Production(ProductionGateway),
    /// Deterministic in-memory catalog
    Mock(MockGateway),
}

/// Which implementation a [`Gateway`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    Production,
    Mock,
}

impl fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayKind::Production => write!(f, "production"),
            GatewayKind::Mock => write!(f, "mock"),
        }
    }
}
