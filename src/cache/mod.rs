//! Cache Module
//!
//! In-process key-value engine with TTL expiration and LRU eviction. Backs
//! `MemoryCurrencyCache` when no Redis server is configured.

mod entry;
mod lru;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 64 * 1024; // 64 KB
