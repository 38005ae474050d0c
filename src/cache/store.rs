//! Cache Store Module
//!
//! Synchronous key/value engine behind [`MemoryCache`](super::MemoryCache):
//! HashMap storage, LRU capacity eviction, per-entry TTL and prefix eviction.

use std::collections::HashMap;
use std::time::Duration;

use super::entry::CacheEntry;
use super::lru::LruTracker;
use crate::cache::{CacheStats, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
}

impl CacheStore {
    /// Creates an empty store holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::default(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`, overwriting and resetting the
    /// TTL of any previous entry. At capacity the least recently used entry
    /// is evicted first.
    pub fn set(&mut self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key must be 1..={} bytes, got {}",
                MAX_KEY_LENGTH,
                key.len()
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::ValueTooLarge(format!(
                "{} bytes exceeds limit of {}",
                value.len(),
                MAX_VALUE_SIZE
            )));
        }

        let is_overwrite = self.entries.contains_key(key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(CacheError::CacheFull(
                        "cache is full and eviction failed".to_string(),
                    ))
                }
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        self.lru.touch(key);

        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`. Expired entries are dropped on the
    /// spot and count as misses.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let expired = self.entries.get(key).map(CacheEntry::is_expired);
        if expired == Some(true) {
            self.remove_key(key);
            self.stats.record_expired(1);
        }

        let live = self.entries.get(key).map(|entry| entry.value.clone());
        self.stats.record_lookup(live.is_some());
        if live.is_some() {
            self.lru.touch(key);
        }
        live
    }

    // == Delete ==
    /// Removes `key`, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.remove_key(key);
        if removed {
            self.stats.record_invalidated(1);
        }
        removed
    }

    // == Delete Prefix ==
    /// Removes every key starting with `prefix`, returning how many went.
    pub fn delete_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        self.lru.remove_prefix(prefix);
        let removed = before - self.entries.len();
        self.stats.record_invalidated(removed);
        removed
    }

    // == Clear ==
    /// Empties the store. Counted as invalidations, not evictions.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.record_invalidated(removed);
        removed
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_key(key);
        }

        self.stats.record_expired(expired_keys.len());
        expired_keys.len()
    }

    /// Counts live and expired entries under `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.entries.keys().filter(|k| k.starts_with(prefix)).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_key(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }
}
