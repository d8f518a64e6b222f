//! Origin connection configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the static-file origin lives and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OriginConfig {
    /// Origin host (reverse proxy in front of the snapshot files)
    #[serde(default = "default_origin_host")]
    pub host: String,
    /// Origin port
    #[serde(default = "default_origin_port")]
    pub port: u16,
    /// Use HTTPS
    #[serde(default)]
    pub tls: bool,
    /// Per-attempt timeout for data calls, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Timeout for the health probe, in milliseconds
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            host: default_origin_host(),
            port: default_origin_port(),
            tls: false,
            timeout_ms: default_timeout_ms(),
            health_timeout_ms: default_health_timeout_ms(),
        }
    }
}

impl OriginConfig {
    /// Base URL of the origin, without trailing slash
    pub fn base_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Health probe timeout
    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }
}
