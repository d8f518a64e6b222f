//! Configuration management for the gateway
//!
//! Configuration is resolved once at startup, from a YAML file, from
//! environment variables, or both (environment wins).

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Static-file origin
    #[serde(default)]
    pub origin: OriginConfig,
    /// Retry and circuit-breaker thresholds
    #[serde(default)]
    pub reliability: ReliabilityConfig,
    /// Gateway selection
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Download-link signing
    #[serde(default)]
    pub signing: SigningConfig,
    /// Mock gateway
    #[serde(default)]
    pub mock: MockConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_yaml::from_str(&content)?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load a YAML file, then overlay the process environment
    pub async fn from_file_and_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::from_file(path).await?;
        config.apply_lookup(&|key: &str| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Public base URL used for download links
    pub fn public_base_url(&self) -> String {
        self.signing
            .public_base_url
            .clone()
            .unwrap_or_else(|| self.origin.base_url())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.origin
            .validate()
            .map_err(|e| GatewayError::Config(format!("Origin config error: {}", e)))?;
        self.reliability
            .validate()
            .map_err(|e| GatewayError::Config(format!("Reliability config error: {}", e)))?;
        self.registry
            .validate()
            .map_err(|e| GatewayError::Config(format!("Registry config error: {}", e)))?;
        self.signing
            .validate()
            .map_err(|e| GatewayError::Config(format!("Signing config error: {}", e)))?;
        self.mock
            .validate()
            .map_err(|e| GatewayError::Config(format!("Mock config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| GatewayError::Config(format!("Logging config error: {}", e)))?;

        if self.origin.health_timeout_ms >= self.origin.timeout_ms {
            warn!(
                "Health timeout ({}ms) is not shorter than the call timeout ({}ms)",
                self.origin.health_timeout_ms, self.origin.timeout_ms
            );
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
