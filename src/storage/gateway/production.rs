//! Gateway backed by the real static-file origin

use super::listing::parse_listing;
use crate::config::Config;
use crate::core::signing::LinkSigner;
use crate::core::traits::{StorageGateway, trim_path};
use crate::core::types::{AccessTier, MetricsRecorder, ObjectEntry, ServiceMetrics, SignedLink};
use crate::utils::error::{CircuitState, GatewayError, ReliabilityPolicy, Result};
use crate::utils::time::SharedClock;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Talks to the origin over HTTP, every data call wrapped in the reliability policy
#[derive(Debug)]
pub struct ProductionGateway {
    client: Client,
    base_url: String,
    origin: Url,
    health_timeout: Duration,
    policy: ReliabilityPolicy,
    signer: LinkSigner,
    metrics: MetricsRecorder,
}

impl ProductionGateway {
    /// Create a gateway from configuration. No network traffic happens here.
    pub fn new(config: &Config, clock: SharedClock) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to build HTTP client: {}", e)))?;

        let signer = LinkSigner::new(
            config.signing.secret.clone(),
            config.public_base_url(),
            clock.clone(),
        );

        let base_url = config.origin.base_url();
        let origin = Url::parse(&base_url)?;

        Ok(Self {
            client,
            base_url,
            origin,
            health_timeout: config.origin.health_timeout(),
            policy: ReliabilityPolicy::new(
                config.reliability.circuit_breaker(),
                config.reliability.retry(),
                config.origin.timeout(),
            ),
            signer,
            metrics: MetricsRecorder::new(clock),
        })
    }

    /// Origin base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current breaker state
    pub fn circuit_state(&self) -> CircuitState {
        self.policy.circuit_state()
    }

    /// `/collection/<segments>` with every segment percent-encoded
    fn collection_url(&self, path: &str, trailing_slash: bool) -> Result<String> {
        let mut url = self.origin.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                GatewayError::config(format!("Origin {} cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty().push("collection");
            segments.extend(trim_path(path).split('/').filter(|s| !s.is_empty()));
            if trailing_slash {
                segments.push("");
            }
        }
        Ok(url.into())
    }

    fn listing_url(&self, path: &str) -> Result<String> {
        self.collection_url(path, true)
    }

    fn object_url(&self, path: &str) -> Result<String> {
        self.collection_url(path, false)
    }

    async fn fetch_listing(&self, url: &str) -> Result<Vec<ObjectEntry>> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Listing {} returned 404, treating as empty", url);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(GatewayError::from_status(
                status.as_u16(),
                format!("GET {} failed", url),
            ));
        }

        let body = response.text().await?;
        parse_listing(&body)
    }

    async fn probe(&self, url: &str) -> Result<bool> {
        let response = self.client.head(url).send().await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(GatewayError::from_status(
                status.as_u16(),
                format!("HEAD {} failed", url),
            ));
        }
        Ok(status.is_success())
    }
}

#[async_trait]
impl StorageGateway for ProductionGateway {
    async fn list_entries(&self, path: &str) -> Result<Vec<ObjectEntry>> {
        let url = self.listing_url(path)?;
        self.metrics
            .track(self.policy.execute(|| self.fetch_listing(&url)))
            .await
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let url = self.object_url(path)?;
        let outcome = self
            .metrics
            .track(self.policy.execute(|| self.probe(&url)))
            .await;

        match outcome {
            // A persistent 5xx still answers the question negatively
            Err(GatewayError::OriginServer { status, .. }) => {
                warn!("Existence check for {} kept failing with {}", url, status);
                Ok(false)
            }
            other => other,
        }
    }

    fn sign_link(&self, path: &str, tier: AccessTier, validity_hours: u64) -> Result<SignedLink> {
        self.signer.sign(path, tier, validity_hours)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match tokio::time::timeout(self.health_timeout, self.client.head(&url).send()).await {
            Ok(Ok(response)) if response.status().is_success() => true,
            Ok(Ok(response)) => {
                warn!("Origin health check returned {}", response.status());
                false
            }
            Ok(Err(e)) => {
                warn!("Origin health check failed: {}", e);
                false
            }
            Err(_) => {
                warn!(
                    "Origin health check timed out after {:?}",
                    self.health_timeout
                );
                false
            }
        }
    }

    fn metrics(&self) -> ServiceMetrics {
        self.metrics.snapshot(self.policy.circuit_state())
    }

    fn name(&self) -> &str {
        "production"
    }
}
