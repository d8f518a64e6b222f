//! Metrics sinks

use crate::core::types::ServiceMetrics;
use crate::utils::error::CircuitState;
use parking_lot::Mutex;
use tracing::{info, warn};

/// Receives gateway metrics snapshots
pub trait MetricsSink: Send + Sync {
    fn publish(&self, gateway: &str, metrics: &ServiceMetrics);
}

/// Writes snapshots as structured log events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetricsSink;

impl MetricsSink for TracingMetricsSink {
    fn publish(&self, gateway: &str, metrics: &ServiceMetrics) {
        let last_request_at = metrics
            .last_request_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();

        if metrics.circuit_state == CircuitState::Open {
            warn!(
                gateway,
                request_count = metrics.request_count,
                error_count = metrics.error_count,
                average_response_time_ms = metrics.average_response_time_ms,
                circuit_state = %metrics.circuit_state,
                last_request_at = %last_request_at,
                "origin circuit is open"
            );
        } else {
            info!(
                gateway,
                request_count = metrics.request_count,
                error_count = metrics.error_count,
                average_response_time_ms = metrics.average_response_time_ms,
                circuit_state = %metrics.circuit_state,
                last_request_at = %last_request_at,
                "gateway metrics"
            );
        }
    }
}

/// Keeps every snapshot in memory
#[derive(Debug, Default)]
pub struct MemoryMetricsSink {
    published: Mutex<Vec<(String, ServiceMetrics)>>,
}

impl MemoryMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots published so far, oldest first
    pub fn published(&self) -> Vec<(String, ServiceMetrics)> {
        self.published.lock().clone()
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<(String, ServiceMetrics)> {
        self.published.lock().last().cloned()
    }
}

impl MetricsSink for MemoryMetricsSink {
    fn publish(&self, gateway: &str, metrics: &ServiceMetrics) {
        self.published
            .lock()
            .push((gateway.to_string(), metrics.clone()));
    }
}
