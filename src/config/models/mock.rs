//! Mock gateway configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulated latency for one class of mock call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatencyProfile {
    /// Fixed part, in milliseconds
    pub base_ms: u64,
    /// Upper bound of the random part, in milliseconds
    pub jitter_ms: u64,
}

impl LatencyProfile {
    pub fn base(&self) -> Duration {
        Duration::from_millis(self.base_ms)
    }

    pub fn jitter(&self) -> Duration {
        Duration::from_millis(self.jitter_ms)
    }
}

fn default_list_latency() -> LatencyProfile {
    LatencyProfile {
        base_ms: 150,
        jitter_ms: 100,
    }
}

fn default_exists_latency() -> LatencyProfile {
    LatencyProfile {
        base_ms: 20,
        jitter_ms: 20,
    }
}

fn default_size_variance() -> f64 {
    0.1
}

/// Mock catalog and latency settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MockConfig {
    /// Seed for catalog sizes and latency jitter
    #[serde(default = "default_mock_seed")]
    pub seed: u64,
    /// Sleep before answering
    #[serde(default)]
    pub latency_enabled: bool,
    /// Listing latency
    #[serde(default = "default_list_latency")]
    pub list_latency: LatencyProfile,
    /// Existence-check latency
    #[serde(default = "default_exists_latency")]
    pub exists_latency: LatencyProfile,
    /// Relative size spread around each collection's base size
    #[serde(default = "default_size_variance")]
    pub size_variance: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: default_mock_seed(),
            latency_enabled: false,
            list_latency: default_list_latency(),
            exists_latency: default_exists_latency(),
            size_variance: default_size_variance(),
        }
    }
}
