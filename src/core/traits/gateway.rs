//! Storage gateway trait definition

use crate::core::types::{AccessTier, ObjectEntry, ServiceMetrics, SignedLink};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Contract over the static-file origin.
///
/// # Empty listings
///
/// [`list_entries`](StorageGateway::list_entries) returns `[]` both for an
/// empty directory and for a path that does not exist. The two cases are
/// deliberately indistinguishable; an empty list is not proof of existence.
/// Use [`exists`](StorageGateway::exists) when the difference matters.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Immediate children of `path`.
    ///
    /// `""` or `"/"` lists the top-level collections; `"<id>"` lists the
    /// entries of one collection.
    async fn list_entries(&self, path: &str) -> Result<Vec<ObjectEntry>>;

    /// Whether `path` names a known directory or file
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Sign a download link. Fails only when no secret is configured.
    fn sign_link(&self, path: &str, tier: AccessTier, validity_hours: u64) -> Result<SignedLink>;

    /// Best-effort liveness probe with its own short deadline; never errors
    async fn health_check(&self) -> bool;

    /// Snapshot of this instance's metrics
    fn metrics(&self) -> ServiceMetrics;

    /// Implementation name, for diagnostics
    fn name(&self) -> &str;
}

/// Trim surrounding slashes so `"/a/"`, `"a/"` and `"a"` all name the same path
pub fn trim_path(path: &str) -> &str {
    path.trim_matches('/')
}
