//! Gateway enum dispatch

use super::types::{Gateway, GatewayKind};
use super::{MockGateway, ProductionGateway};
use crate::core::traits::StorageGateway;
use crate::core::types::{AccessTier, ObjectEntry, ServiceMetrics, SignedLink};
use crate::utils::error::Result;
use async_trait::async_trait;

impl Gateway {
    /// Which implementation this is
    pub fn kind(&self) -> GatewayKind {
        match self {
            Gateway::Production(_) => GatewayKind::Production,
            Gateway::Mock(_) => GatewayKind::Mock,
        }
    }

    /// The mock gateway, for test hooks
    pub fn as_mock(&self) -> Option<&MockGateway> {
        match self {
            Gateway::Mock(gateway) => Some(gateway),
            Gateway::Production(_) => None,
        }
    }

    /// The production gateway
    pub fn as_production(&self) -> Option<&ProductionGateway> {
        match self {
            Gateway::Production(gateway) => Some(gateway),
            Gateway::Mock(_) => None,
        }
    }
}

impl From<ProductionGateway> for Gateway {
    fn from(gateway: ProductionGateway) -> Self {
        Gateway::Production(gateway)
    }
}

impl From<MockGateway> for Gateway {
    fn from(gateway: MockGateway) -> Self {
        Gateway::Mock(gateway)
    }
}

#[async_trait]
impl StorageGateway for Gateway {
    async fn list_entries(&self, path: &str) -> Result<Vec<ObjectEntry>> {
        match self {
            Gateway::Production(gateway) => gateway.list_entries(path).await,
            Gateway::Mock(gateway) => gateway.list_entries(path).await,
        }
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        match self {
            Gateway::Production(gateway) => gateway.exists(path).await,
            Gateway::Mock(gateway) => gateway.exists(path).await,
        }
    }

    fn sign_link(&self, path: &str, tier: AccessTier, validity_hours: u64) -> Result<SignedLink> {
        match self {
            Gateway::Production(gateway) => gateway.sign_link(path, tier, validity_hours),
            Gateway::Mock(gateway) => gateway.sign_link(path, tier, validity_hours),
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            Gateway::Production(gateway) => gateway.health_check().await,
            Gateway::Mock(gateway) => gateway.health_check().await,
        }
    }

    fn metrics(&self) -> ServiceMetrics {
        match self {
            Gateway::Production(gateway) => gateway.metrics(),
            Gateway::Mock(gateway) => gateway.metrics(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Gateway::Production(gateway) => gateway.name(),
            Gateway::Mock(gateway) => gateway.name(),
        }
    }
}
