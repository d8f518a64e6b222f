//! Metrics publication
//!
//! Gateway metrics are pulled periodically and pushed to a [`MetricsSink`].
//! A sustained `Open` circuit is logged at warn level so operators can alert
//! on it.

pub mod reporter;
pub mod sink;

pub use reporter::MetricsReporter;
pub use sink::{MemoryMetricsSink, MetricsSink, TracingMetricsSink};
