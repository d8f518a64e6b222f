//! Periodic metrics reporting task

use super::sink::MetricsSink;
use crate::core::registry::GatewayRegistry;
use crate::core::traits::StorageGateway;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Background task publishing the active gateway's metrics on an interval.
///
/// The task stops when the reporter is dropped or shut down.
#[derive(Debug)]
pub struct MetricsReporter {
    handle: JoinHandle<()>,
}

impl MetricsReporter {
    /// Start reporting every `every`. Ticks before the registry resolves are skipped.
    pub fn spawn(
        registry: Arc<GatewayRegistry>,
        sink: Arc<dyn MetricsSink>,
        every: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                match registry.gateway() {
                    Ok(gateway) => sink.publish(gateway.name(), &gateway.metrics()),
                    Err(e) => debug!("Skipping metrics report: {}", e),
                }
            }
        });
        Self { handle }
    }

    /// Stop the task
    pub fn shutdown(self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for MetricsReporter {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
