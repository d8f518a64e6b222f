//! Access collaborators consulted before a download link is handed out
//!
//! Tier resolution and bandwidth admission live outside this crate; only
//! their shape is defined here, plus in-memory implementations for tests and
//! local development.

use crate::core::facade::{SnapshotService, validate_segment};
use crate::core::traits::StorageGateway;
use crate::core::types::{AccessTier, SignedLink};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

/// Maps a caller identity to its subscription tier
#[async_trait]
pub trait TierResolver: Send + Sync {
    async fn resolve_tier(&self, identity: &str) -> Result<AccessTier>;
}

/// Decides whether a caller may start another download
#[async_trait]
pub trait BandwidthAdmission: Send + Sync {
    async fn admit(&self, identity: &str, tier: AccessTier) -> Result<bool>;
}

/// Fixed identity-to-tier table with a default for unknown callers
#[derive(Debug, Clone)]
pub struct StaticTierResolver {
    tiers: HashMap<String, AccessTier>,
    default_tier: AccessTier,
}

impl StaticTierResolver {
    pub fn new(default_tier: AccessTier) -> Self {
        Self {
            tiers: HashMap::new(),
            default_tier,
        }
    }

    /// Assign `tier` to `identity`
    pub fn with_tier(mut self, identity: impl Into<String>, tier: AccessTier) -> Self {
        self.tiers.insert(identity.into(), tier);
        self
    }
}

#[async_trait]
impl TierResolver for StaticTierResolver {
    async fn resolve_tier(&self, identity: &str) -> Result<AccessTier> {
        Ok(self
            .tiers
            .get(identity)
            .copied()
            .unwrap_or(self.default_tier))
    }
}

/// Admits everyone except an explicit deny list
#[derive(Debug, Clone, Default)]
pub struct StaticAdmission {
    denied: HashSet<String>,
}

impl StaticAdmission {
    /// Admit every caller
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Refuse `identity`
    pub fn deny(mut self, identity: impl Into<String>) -> Self {
        self.denied.insert(identity.into());
        self
    }
}

#[async_trait]
impl BandwidthAdmission for StaticAdmission {
    async fn admit(&self, identity: &str, _tier: AccessTier) -> Result<bool> {
        Ok(!self.denied.contains(identity))
    }
}

/// Issues download links after tier resolution and admission
#[derive(Clone)]
pub struct DownloadIssuer {
    service: SnapshotService,
    tiers: Arc<dyn TierResolver>,
    admission: Arc<dyn BandwidthAdmission>,
}

impl DownloadIssuer {
    pub fn new(
        service: SnapshotService,
        tiers: Arc<dyn TierResolver>,
        admission: Arc<dyn BandwidthAdmission>,
    ) -> Self {
        Self {
            service,
            tiers,
            admission,
        }
    }

    /// Resolve the caller's tier, check admission and existence, then sign
    pub async fn issue(
        &self,
        identity: &str,
        collection_id: &str,
        filename: &str,
    ) -> Result<SignedLink> {
        validate_segment("collection id", collection_id)?;
        validate_segment("file name", filename)?;
        let tier = self.tiers.resolve_tier(identity).await?;

        if !self.admission.admit(identity, tier).await? {
            warn!("Download of {}/{} refused for {}", collection_id, filename, identity);
            return Err(GatewayError::AdmissionDenied(format!(
                "bandwidth allowance exhausted for {} tier",
                tier
            )));
        }

        let gateway = self.service.registry().gateway()?;
        let path = format!("{}/{}", collection_id, filename);
        if !gateway.exists(&path).await? {
            return Err(GatewayError::not_found(path));
        }

        let link = self
            .service
            .build_download_link(collection_id, filename, tier)
            .await?;
        info!(
            "Issued {} download link for {}/{} expiring at {}",
            tier, collection_id, filename, link.expires_at_epoch_seconds
        );
        Ok(link)
    }
}

impl std::fmt::Debug for DownloadIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadIssuer")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
