//! Deterministic in-memory gateway for tests and local development

use super::catalog::Catalog;
use crate::config::{Config, LatencyProfile, MockConfig};
use crate::core::signing::LinkSigner;
use crate::core::traits::{StorageGateway, trim_path};
use crate::core::types::{AccessTier, MetricsRecorder, ObjectEntry, ServiceMetrics, SignedLink};
use crate::utils::error::{CircuitState, GatewayError, Result};
use crate::utils::time::SharedClock;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::debug;

/// Mock gateway serving a pre-generated catalog.
///
/// Catalog changes made through the test hooks stay local to the instance.
#[derive(Debug)]
pub struct MockGateway {
    config: MockConfig,
    catalog: RwLock<Catalog>,
    rng: Mutex<StdRng>,
    failure_rate: Mutex<f64>,
    signer: LinkSigner,
    metrics: MetricsRecorder,
    clock: SharedClock,
}

impl MockGateway {
    /// Create a mock gateway with its catalog generated as of the clock's now
    pub fn new(config: MockConfig, signer: LinkSigner, clock: SharedClock) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let catalog = Catalog::generate(clock.now(), config.size_variance, &mut rng);
        debug!(
            "Mock gateway generated {} collections (seed {})",
            catalog.len(),
            config.seed
        );

        Self {
            catalog: RwLock::new(catalog),
            rng: Mutex::new(rng),
            failure_rate: Mutex::new(0.0),
            metrics: MetricsRecorder::new(clock.clone()),
            config,
            signer,
            clock,
        }
    }

    /// Create a mock gateway from the full configuration
    pub fn from_config(config: &Config, clock: SharedClock) -> Self {
        let signer = LinkSigner::new(
            config.signing.secret.clone(),
            config.public_base_url(),
            clock.clone(),
        );
        Self::new(config.mock.clone(), signer, clock)
    }

    /// Fail subsequent calls with probability `rate` (clamped to `[0, 1]`)
    pub fn simulate_failure(&self, rate: f64) {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        *self.failure_rate.lock() = rate;
    }

    /// Register an extra synthetic collection, replacing one with the same id
    pub fn add_collection(&self, id: &str, base_size: u64) {
        let now = self.clock.now();
        let mut rng = self.rng.lock();
        self.catalog
            .write()
            .insert(id, base_size, now, self.config.size_variance, &mut rng);
    }

    /// Known collection ids, sorted
    pub fn collection_ids(&self) -> Vec<String> {
        self.catalog.read().ids()
    }

    fn should_fail(&self) -> bool {
        let rate = *self.failure_rate.lock();
        rate > 0.0 && self.rng.lock().gen_bool(rate)
    }

    fn latency(&self, profile: LatencyProfile) -> Option<Duration> {
        if !self.config.latency_enabled {
            return None;
        }
        let jitter = profile.jitter();
        if jitter.is_zero() {
            return Some(profile.base());
        }
        let share: f64 = self.rng.lock().gen_range(0.0..=1.0);
        Some(profile.base() + jitter.mul_f64(share))
    }

    async fn simulate(&self, profile: LatencyProfile, operation: &str) -> Result<()> {
        if let Some(delay) = self.latency(profile) {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail() {
            return Err(GatewayError::transport(format!(
                "simulated failure during {}",
                operation
            )));
        }
        Ok(())
    }

    fn lookup_entries(&self, path: &str) -> Vec<ObjectEntry> {
        let catalog = self.catalog.read();
        let trimmed = trim_path(path);
        if trimmed.is_empty() {
            return catalog.directories();
        }
        catalog
            .entries(trimmed)
            .map(|entries| entries.to_vec())
            .unwrap_or_default()
    }

    fn lookup_exists(&self, path: &str) -> bool {
        let catalog = self.catalog.read();
        let trimmed = trim_path(path);
        if trimmed.is_empty() {
            return true;
        }
        match trimmed.split_once('/') {
            None => catalog.contains_collection(trimmed),
            Some((id, name)) => catalog.contains_file(id, name),
        }
    }
}

#[async_trait]
impl StorageGateway for MockGateway {
    async fn list_entries(&self, path: &str) -> Result<Vec<ObjectEntry>> {
        self.metrics
            .track(async {
                self.simulate(self.config.list_latency, "listing").await?;
                Ok(self.lookup_entries(path))
            })
            .await
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        self.metrics
            .track(async {
                self.simulate(self.config.exists_latency, "existence check")
                    .await?;
                Ok(self.lookup_exists(path))
            })
            .await
    }

    fn sign_link(&self, path: &str, tier: AccessTier, validity_hours: u64) -> Result<SignedLink> {
        self.signer.sign(path, tier, validity_hours)
    }

    async fn health_check(&self) -> bool {
        !self.should_fail()
    }

    fn metrics(&self) -> ServiceMetrics {
        self.metrics.snapshot(CircuitState::Closed)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
