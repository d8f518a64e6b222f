//! Read-only snapshot operations on top of the resolved gateway
//!
//! The service never branches on which gateway is active and never catches
//! gateway errors; it only composes listings and signing.

use crate::core::cache::TtlCache;
use crate::core::registry::GatewayRegistry;
use crate::core::traits::{StorageGateway, trim_path};
use crate::core::types::{AccessTier, ObjectEntry, SignedLink};
use crate::utils::error::{GatewayError, Result};
use crate::utils::format_bytes;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Archive extensions recognised as snapshot data, longest first
pub const DATA_EXTENSIONS: &[&str] = &[".tar.zst", ".tar.lz4", ".tar.gz", ".tar"];

/// Suffix of the alias that points at the newest snapshot
const LATEST_SUFFIX: &str = "-latest";

/// Chain ids end in short numeric revisions (`cosmoshub-4`); heights are longer
static HEIGHT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-(\d{4,})\.tar").expect("static height pattern"));

static TIMESTAMP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\d{8}-\d{6}\.tar").expect("static timestamp pattern"));

/// One collection with aggregate figures over its snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Collection id (directory name on the origin)
    pub id: String,
    /// Number of snapshot archives, alias excluded
    pub snapshot_count: usize,
    /// Combined size of those archives
    pub total_size_bytes: u64,
    /// Modification time of the newest archive
    pub latest_snapshot_at: Option<DateTime<Utc>>,
    /// Directory modification time
    pub modified_at: DateTime<Utc>,
}

/// One downloadable snapshot archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    /// File name inside the collection
    pub name: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
    /// Block height, when the name carries one
    pub height: Option<u64>,
    /// Archive extension, e.g. `.tar.zst`
    pub format: String,
}

/// Extension of a snapshot data file, if `name` is one
pub fn data_extension(name: &str) -> Option<&'static str> {
    DATA_EXTENSIONS.iter().copied().find(|ext| name.ends_with(ext))
}

/// Whether `name` is the `<id>-latest.<ext>` alias
pub fn is_latest_alias(name: &str) -> bool {
    data_extension(name)
        .and_then(|ext| name.strip_suffix(ext))
        .is_some_and(|stem| stem.ends_with(LATEST_SUFFIX))
}

/// Block height encoded as `-<digits>.tar...` (four digits or more), unless the name is timestamp-formatted
pub fn extract_height(name: &str) -> Option<u64> {
    if TIMESTAMP_PATTERN.is_match(name) {
        return None;
    }
    HEIGHT_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Keep snapshot archives, drop the latest alias, newest first
pub fn snapshots_from_entries(entries: &[ObjectEntry]) -> Vec<SnapshotInfo> {
    let mut snapshots: Vec<SnapshotInfo> = entries
        .iter()
        .filter(|entry| entry.is_file() && !is_latest_alias(&entry.name))
        .filter_map(|entry| {
            data_extension(&entry.name).map(|ext| SnapshotInfo {
                name: entry.name.clone(),
                size_bytes: entry.size_bytes,
                modified_at: entry.modified_at,
                height: extract_height(&entry.name),
                format: ext.to_string(),
            })
        })
        .collect();

    snapshots.sort_by(|a, b| {
        b.modified_at
            .cmp(&a.modified_at)
            .then_with(|| b.name.cmp(&a.name))
    });
    snapshots
}

pub(crate) fn validate_segment(kind: &str, value: &str) -> Result<()> {
    let trimmed = trim_path(value);
    if trimmed.is_empty() || trimmed.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
        return Err(GatewayError::validation(format!(
            "Invalid {} '{}'",
            kind, value
        )));
    }
    Ok(())
}

/// Snapshot queries routed through the registry's gateway
#[derive(Debug, Clone)]
pub struct SnapshotService {
    registry: Arc<GatewayRegistry>,
    listing_cache: Option<Arc<TtlCache<String, Vec<ObjectEntry>>>>,
}

impl SnapshotService {
    /// Create a service without listing cache
    pub fn new(registry: Arc<GatewayRegistry>) -> Self {
        Self {
            registry,
            listing_cache: None,
        }
    }

    /// Cache successful listings per path
    pub fn with_listing_cache(mut self, cache: TtlCache<String, Vec<ObjectEntry>>) -> Self {
        self.listing_cache = Some(Arc::new(cache));
        self
    }

    /// The registry this service routes through
    pub fn registry(&self) -> &Arc<GatewayRegistry> {
        &self.registry
    }

    async fn list(&self, path: &str) -> Result<Vec<ObjectEntry>> {
        let gateway = self.registry.gateway()?;
        let key = trim_path(path).to_string();

        if let Some(cache) = &self.listing_cache {
            if let Some(entries) = cache.get(&key) {
                debug!("Listing cache hit for '{}'", key);
                return Ok(entries);
            }
        }

        let entries = gateway.list_entries(&key).await?;
        if let Some(cache) = &self.listing_cache {
            cache.insert(key, entries.clone());
        }
        Ok(entries)
    }

    /// Every collection with snapshot count and total size, ordered by id
    pub async fn list_collections(&self) -> Result<Vec<CollectionSummary>> {
        let root = self.list("").await?;
        let directories: Vec<ObjectEntry> = root.into_iter().filter(|e| e.is_directory()).collect();

        let summaries = try_join_all(directories.into_iter().map(|dir| async move {
            let snapshots = snapshots_from_entries(&self.list(&dir.name).await?);
            let total_size_bytes: u64 = snapshots.iter().map(|s| s.size_bytes).sum();
            debug!(
                "Collection {} holds {} snapshots ({})",
                dir.name,
                snapshots.len(),
                format_bytes(total_size_bytes)
            );
            Ok::<_, GatewayError>(CollectionSummary {
                snapshot_count: snapshots.len(),
                total_size_bytes,
                latest_snapshot_at: snapshots.first().map(|s| s.modified_at),
                modified_at: dir.modified_at,
                id: dir.name,
            })
        }))
        .await?;

        let mut summaries = summaries;
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }

    /// Snapshot archives of one collection, newest first.
    ///
    /// An unknown collection yields an empty list, same as an empty one.
    pub async fn list_snapshots(&self, collection_id: &str) -> Result<Vec<SnapshotInfo>> {
        validate_segment("collection id", collection_id)?;
        let entries = self.list(collection_id).await?;
        Ok(snapshots_from_entries(&entries))
    }

    /// Signed link for one archive, valid for the tier's window
    pub async fn build_download_link(
        &self,
        collection_id: &str,
        filename: &str,
        tier: AccessTier,
    ) -> Result<SignedLink> {
        validate_segment("collection id", collection_id)?;
        validate_segment("file name", filename)?;

        let gateway = self.registry.gateway()?;
        let path = format!("/{}/{}", trim_path(collection_id), trim_path(filename));
        gateway.sign_link(&path, tier, tier.validity_hours())
    }

    /// Signed URL for one archive
    pub async fn build_download_url(
        &self,
        collection_id: &str,
        filename: &str,
        tier: AccessTier,
    ) -> Result<String> {
        Ok(self
            .build_download_link(collection_id, filename, tier)
            .await?
            .url)
    }
}
