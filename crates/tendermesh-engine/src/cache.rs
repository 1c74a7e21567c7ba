//! TTL cache for aggregated tender batches.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use tendermesh_core::{Jurisdiction, Tender};
use tracing::debug;

use crate::clock::Clock;

struct CacheEntry {
    tenders: Vec<Tender>,
    stored_at: DateTime<Utc>,
}

/// Batch cache keyed by jurisdiction set, expiring lazily on read.
pub struct TtlCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

/// Canonical cache key: sorted codes joined with commas, so the same set
/// of jurisdictions always maps to the same entry.
pub fn cache_key(jurisdictions: &[Jurisdiction]) -> String {
    let mut codes: Vec<&str> = jurisdictions.iter().map(|j| j.code()).collect();
    codes.sort_unstable();
    codes.join(",")
}

impl TtlCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached batch when it is younger than the TTL.
    ///
    /// Expired entries stay in place; the next `put` overwrites them.
    pub fn get(&self, key: &str) -> Option<Vec<Tender>> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = entries.get(key)?;
        let age = self.clock.now() - entry.stored_at;
        if age >= self.ttl {
            debug!(key, age_secs = age.num_seconds(), "cache entry expired");
            return None;
        }
        Some(entry.tenders.clone())
    }

    pub fn put(&self, key: String, tenders: Vec<Tender>) {
        let entry = CacheEntry {
            tenders,
            stored_at: self.clock.now(),
        };
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, entry);
    }

    /// Drops one entry so the next read for that key aggregates fresh.
    pub fn invalidate(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    pub fn entry_count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
