//! Per-gateway reliability metrics

use crate::utils::error::{CircuitState, Result};
use crate::utils::time::SharedClock;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

/// Smoothing factor of the response-time moving average
pub const RESPONSE_TIME_ALPHA: f64 = 0.1;

/// Point-in-time view of a gateway's metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceMetrics {
    /// Calls made through the gateway
    pub request_count: u64,
    /// Calls that returned an error
    pub error_count: u64,
    /// When the last call finished
    pub last_request_at: Option<DateTime<Utc>>,
    /// Exponential moving average of call duration
    pub average_response_time_ms: f64,
    /// Breaker state at snapshot time
    pub circuit_state: CircuitState,
}

impl ServiceMetrics {
    /// Share of calls that failed, in [0, 1]
    pub fn error_rate(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.error_count as f64 / self.request_count as f64
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    request_count: u64,
    error_count: u64,
    last_request_at: Option<DateTime<Utc>>,
    average_response_time_ms: f64,
}

/// Mutable metrics owned by one gateway.
///
/// Every update happens under one lock, so the counters and the average are
/// always consistent with each other in a snapshot.
#[derive(Debug)]
pub struct MetricsRecorder {
    counters: Mutex<Counters>,
    clock: SharedClock,
}

impl MetricsRecorder {
    /// Create an empty recorder
    pub fn new(clock: SharedClock) -> Self {
        Self {
            counters: Mutex::new(Counters::default()),
            clock,
        }
    }

    /// Record one finished call
    pub fn record(&self, elapsed: Duration, success: bool) {
        let sample_ms = elapsed.as_secs_f64() * 1000.0;
        let now = self.clock.now();

        let mut counters = self.counters.lock();
        counters.average_response_time_ms = if counters.request_count == 0 {
            sample_ms
        } else {
            RESPONSE_TIME_ALPHA * sample_ms
                + (1.0 - RESPONSE_TIME_ALPHA) * counters.average_response_time_ms
        };
        counters.request_count += 1;
        if !success {
            counters.error_count += 1;
        }
        counters.last_request_at = Some(now);
    }

    /// Time `f` and record its outcome
    pub async fn track<F, R>(&self, f: F) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        let started = Instant::now();
        let outcome = f.await;
        self.record(started.elapsed(), outcome.is_ok());
        outcome
    }

    /// Snapshot the counters together with the given breaker state
    pub fn snapshot(&self, circuit_state: CircuitState) -> ServiceMetrics {
        let counters = self.counters.lock();
        ServiceMetrics {
            request_count: counters.request_count,
            error_count: counters.error_count,
            last_request_at: counters.last_request_at,
            average_response_time_ms: counters.average_response_time_ms,
            circuit_state,
        }
    }
}
