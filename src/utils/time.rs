//! Injectable clocks
//!
//! Anything that stamps, expires or ages data takes a [`Clock`] so tests can
//! pin the current time instead of racing the wall clock.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time
    fn now(&self) -> DateTime<Utc>;

    /// Current time as whole seconds since the Unix epoch
    fn epoch_seconds(&self) -> u64 {
        self.now().timestamp().max(0) as u64
    }
}

/// Shared, type-erased clock handle
pub type SharedClock = Arc<dyn Clock>;

/// The real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// A shared handle to the system clock
    pub fn shared() -> SharedClock {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Create a clock frozen at the given epoch second
    pub fn at_epoch(seconds: i64) -> Self {
        Self::new(DateTime::from_timestamp(seconds, 0).unwrap_or_default())
    }

    /// Move the clock forward
    pub fn advance(&self, by: std::time::Duration) {
        let step = ChronoDuration::from_std(by).unwrap_or(ChronoDuration::MAX);
        let mut now = self.now.lock();
        *now = now.checked_add_signed(step).unwrap_or(*now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
