//! Gateway selection configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How the registry picks a gateway implementation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// Real origin, optionally falling back to mock when unhealthy
    Production,
    /// Deterministic in-memory catalog
    Mock,
    /// Decide from the runtime environment
    #[default]
    Auto,
}

impl FromStr for GatewayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(GatewayMode::Production),
            "mock" => Ok(GatewayMode::Mock),
            "auto" => Ok(GatewayMode::Auto),
            other => Err(format!("unknown gateway mode '{}'", other)),
        }
    }
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayMode::Production => write!(f, "production"),
            GatewayMode::Mock => write!(f, "mock"),
            GatewayMode::Auto => write!(f, "auto"),
        }
    }
}

/// Where the process is running
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    Development,
    Test,
    #[default]
    Production,
}

impl FromStr for RuntimeEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(RuntimeEnvironment::Development),
            "test" | "testing" => Ok(RuntimeEnvironment::Test),
            "production" | "prod" | "staging" => Ok(RuntimeEnvironment::Production),
            other => Err(format!("unknown runtime environment '{}'", other)),
        }
    }
}

impl fmt::Display for RuntimeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeEnvironment::Development => write!(f, "development"),
            RuntimeEnvironment::Test => write!(f, "test"),
            RuntimeEnvironment::Production => write!(f, "production"),
        }
    }
}

/// Registry selection settings, resolved once at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Selection mode
    #[serde(default)]
    pub mode: GatewayMode,
    /// Runtime environment consulted by `auto`
    #[serde(default)]
    pub environment: RuntimeEnvironment,
    /// In development, use the real origin under `auto`
    #[serde(default)]
    pub force_origin: bool,
    /// Fall back to mock when the origin is unhealthy at startup
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,
    /// Budget for the startup health check, in milliseconds
    #[serde(default = "default_fallback_timeout_ms")]
    pub fallback_timeout_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            mode: GatewayMode::Auto,
            environment: RuntimeEnvironment::Production,
            force_origin: false,
            fallback_enabled: true,
            fallback_timeout_ms: default_fallback_timeout_ms(),
        }
    }
}

impl RegistryConfig {
    /// Startup health-check budget
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }
}
