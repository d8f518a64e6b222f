//! Synthetic snapshot catalog for the mock gateway

use crate::core::types::ObjectEntry;
use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;

const GIB: u64 = 1024 * 1024 * 1024;

/// Days of history generated per collection
pub const SNAPSHOT_DAYS: i64 = 7;

/// Archive extension used for synthetic snapshots
pub const SNAPSHOT_EXTENSION: &str = ".tar.zst";

/// Collections every mock catalog starts with, and their typical snapshot size
pub const DEFAULT_COLLECTIONS: &[(&str, u64)] = &[
    ("celestia", 60 * GIB),
    ("cosmoshub-4", 120 * GIB),
    ("injective-1", 140 * GIB),
    ("juno-1", 35 * GIB),
    ("noble-1", 8 * GIB),
    ("osmosis-1", 95 * GIB),
];

/// One synthetic collection
#[derive(Debug, Clone)]
pub struct Collection {
    /// Directory entry shown at the root
    pub directory: ObjectEntry,
    /// Files inside the collection, newest first, alias last
    pub entries: Vec<ObjectEntry>,
}

/// In-memory catalog keyed by collection id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    collections: BTreeMap<String, Collection>,
}

impl Catalog {
    /// Generate the default collections as of `now`
    pub fn generate(now: DateTime<Utc>, variance: f64, rng: &mut StdRng) -> Self {
        let mut catalog = Self::default();
        for (id, base_size) in DEFAULT_COLLECTIONS {
            catalog.insert(id, *base_size, now, variance, rng);
        }
        catalog
    }

    /// Add or replace one collection
    pub fn insert(
        &mut self,
        id: &str,
        base_size: u64,
        now: DateTime<Utc>,
        variance: f64,
        rng: &mut StdRng,
    ) {
        let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let mut entries = Vec::with_capacity(SNAPSHOT_DAYS as usize + 1);

        for day in 0..SNAPSHOT_DAYS {
            let taken_at = midnight - ChronoDuration::days(day);
            let spread = if variance > 0.0 {
                rng.gen_range(-variance..=variance)
            } else {
                0.0
            };
            let size = (base_size as f64 * (1.0 + spread)).round().max(0.0) as u64;
            entries.push(ObjectEntry::file(
                format!(
                    "{}-{}{}",
                    id,
                    taken_at.format("%Y%m%d-%H%M%S"),
                    SNAPSHOT_EXTENSION
                ),
                size,
                taken_at,
            ));
        }

        // Alias of the newest snapshot
        let newest = entries[0].clone();
        entries.push(ObjectEntry::file(
            format!("{}-latest{}", id, SNAPSHOT_EXTENSION),
            newest.size_bytes,
            newest.modified_at,
        ));

        self.collections.insert(
            id.to_string(),
            Collection {
                directory: ObjectEntry::directory(id, newest.modified_at),
                entries,
            },
        );
    }

    /// Directory entries for every collection, ordered by id
    pub fn directories(&self) -> Vec<ObjectEntry> {
        self.collections
            .values()
            .map(|c| c.directory.clone())
            .collect()
    }

    /// Files of one collection
    pub fn entries(&self, id: &str) -> Option<&[ObjectEntry]> {
        self.collections.get(id).map(|c| c.entries.as_slice())
    }

    /// Whether `id` is a known collection
    pub fn contains_collection(&self, id: &str) -> bool {
        self.collections.contains_key(id)
    }

    /// Whether `name` is a file of collection `id`
    pub fn contains_file(&self, id: &str, name: &str) -> bool {
        self.entries(id)
            .is_some_and(|entries| entries.iter().any(|e| e.name == name))
    }

    /// Collection ids, sorted
    pub fn ids(&self) -> Vec<String> {
        self.collections.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
