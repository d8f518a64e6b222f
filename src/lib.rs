//! # snapshot-gateway
//!
//! Storage-access gateway for a blockchain snapshot storefront.
//!
//! The gateway sits between the storefront and a static-file origin reached
//! through a reverse proxy. It:
//!
//! - selects a Production or Mock implementation once at startup, optionally
//!   falling back to the mock when the origin is unhealthy;
//! - wraps every origin call in circuit-breaker, retry and timeout policies;
//! - issues signed, tier-scoped, time-limited download links;
//! - tracks per-instance reliability metrics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snapshot_gateway::{AccessTier, Config, GatewayRegistry, SnapshotService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let registry = Arc::new(GatewayRegistry::new(config));
//!     registry.initialize().await?;
//!
//!     let service = SnapshotService::new(registry);
//!     for collection in service.list_collections().await? {
//!         println!("{}: {} snapshots", collection.id, collection.snapshot_count);
//!     }
//!
//!     let url = service
//!         .build_download_url("noble-1", "noble-1-latest.tar.zst", AccessTier::Free)
//!         .await?;
//!     println!("{}", url);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{Config, GatewayMode, RuntimeEnvironment};
pub use core::access::{
    BandwidthAdmission, DownloadIssuer, StaticAdmission, StaticTierResolver, TierResolver,
};
pub use core::cache::TtlCache;
pub use core::facade::{CollectionSummary, SnapshotInfo, SnapshotService};
pub use core::registry::{GatewayRegistry, GatewaySelection};
pub use core::signing::LinkSigner;
pub use core::traits::StorageGateway;
pub use core::types::{AccessTier, EntryKind, ObjectEntry, ServiceMetrics, SignedLink};
pub use monitoring::{MetricsReporter, MetricsSink, TracingMetricsSink};
pub use storage::gateway::{Gateway, GatewayKind, MockGateway, ProductionGateway};
pub use utils::error::{CircuitState, GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
