//! Capacity-bounded TTL cache
//!
//! Entries are evicted least-recently-used when full and treated as absent
//! once older than the TTL. Age is measured with the injected [`Clock`], so
//! tests control expiry.
//!
//! [`Clock`]: crate::utils::time::Clock

use crate::utils::time::SharedClock;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use lru::LruCache;
use parking_lot::Mutex;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::Duration;

#[derive(Debug)]
struct Slot<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// LRU cache whose entries expire after a fixed TTL
#[derive(Debug)]
pub struct TtlCache<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, Slot<V>>>,
    ttl: ChronoDuration,
    clock: SharedClock,
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V> {
    /// Create a cache holding at most `capacity` entries for `ttl` each
    pub fn new(capacity: NonZeroUsize, ttl: Duration, clock: SharedClock) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl: ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::MAX),
            clock,
        }
    }

    /// Fresh value for `key`, dropping it if expired
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            Some(slot) if now - slot.stored_at < self.ttl => return Some(slot.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    /// Store `value`, evicting the least recently used entry when full
    pub fn insert(&self, key: K, value: V) {
        let stored_at = self.clock.now();
        self.entries.lock().put(key, Slot { value, stored_at });
    }

    /// Remove one entry
    pub fn invalidate(&self, key: &K) {
        self.entries.lock().pop(key);
    }

    /// Remove everything
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Entries currently held, expired ones included
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
