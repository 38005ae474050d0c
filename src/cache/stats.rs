//! Cache Statistics Module
//!
//! Counters kept by the in-memory store. Removals are split by cause so an
//! operator can tell capacity pressure (LRU) apart from TTL expiry and from
//! write invalidation.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    /// Absent or expired at lookup time
    pub misses: u64,
    /// Dropped to make room
    pub evictions: u64,
    /// Dropped because their TTL ran out
    pub expirations: u64,
    /// Removed by key or namespace eviction
    pub invalidations: u64,
    /// Filled in when a snapshot is taken
    pub total_entries: usize,
}

impl CacheStats {
    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            return 0.0;
        }
        self.hits as f64 / lookups as f64
    }

    pub(crate) fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_expired(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub(crate) fn record_invalidated(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    /// Copy of the counters with the current entry count.
    pub(crate) fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..self.clone()
        }
    }
}
