//! Cache backend contract and its in-process implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;

// == Cache Backend ==
/// Shared key/value store with TTL.
///
/// Implementations must be safe to call from many tasks at once; the weapon
/// store adds no locking of its own.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Live value for `key`, `None` on a miss or expiry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    async fn evict(&self, key: &str) -> Result<(), CacheError>;

    /// Removes every key under `prefix`, returning how many were dropped.
    async fn evict_namespace(&self, prefix: &str) -> Result<usize, CacheError>;

    /// Number of entries under `prefix`, expired ones included until swept.
    async fn count_namespace(&self, prefix: &str) -> Result<usize, CacheError>;

    /// Drops every entry, returning how many were removed.
    async fn clear(&self) -> Result<usize, CacheError>;

    async fn stats(&self) -> Result<CacheStats, CacheError>;

    /// Short name for status reporting.
    fn name(&self) -> &'static str;
}

// == Memory Cache ==
/// In-process [`CacheBackend`] over a [`CacheStore`] behind a tokio RwLock.
///
/// Cloning is cheap and every clone shares the same store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Drops expired entries. Driven by the background cleanup task.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Entries currently held, expired or not.
    pub async fn entry_count(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        // Write lock: reads touch LRU order and stats.
        Ok(self.store.write().await.get(key))
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        self.store.write().await.set(key, value, ttl)
    }

    async fn evict(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.delete(key);
        Ok(())
    }

    async fn evict_namespace(&self, prefix: &str) -> Result<usize, CacheError> {
        Ok(self.store.write().await.delete_prefix(prefix))
    }

    async fn count_namespace(&self, prefix: &str) -> Result<usize, CacheError> {
        Ok(self.store.read().await.count_prefix(prefix))
    }

    async fn clear(&self) -> Result<usize, CacheError> {
        Ok(self.store.write().await.clear())
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        Ok(self.store.read().await.stats())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
