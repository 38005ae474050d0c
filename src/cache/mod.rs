//! Cache Module
//!
//! The [`CacheBackend`] contract used by the weapon store, the in-memory
//! implementation with TTL expiration and LRU eviction, and the key layout.

mod backend;
mod entry;
pub mod keys;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, MemoryCache};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes. List keys embed the whole query
/// shape, so this is generous.
pub const MAX_KEY_LENGTH: usize = 1024;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Default entry lifetime: 10 minutes.
pub const DEFAULT_TTL_SECS: u64 = 600;
