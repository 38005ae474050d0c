//! LRU Tracker Module
//!
//! Access-order bookkeeping for capacity eviction in the in-memory cache.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Keys ordered by last access: front is most recent, back is the next
/// eviction victim.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    /// Drops every key under `prefix`, returning how many were tracked.
    pub fn remove_prefix(&mut self, prefix: &str) -> usize {
        let before = self.order.len();
        self.order.retain(|k| !k.starts_with(prefix));
        before - self.order.len()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    /// Pops the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
