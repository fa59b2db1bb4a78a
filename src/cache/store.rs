//! Memory Store Module
//!
//! Synchronous key/value engine behind the in-memory settings cache: an LRU
//! bounded map of byte values with per-entry expiry.

use std::num::NonZeroUsize;
use std::time::Duration;

use lru::LruCache;

use crate::cache::CacheEntry;
use crate::error::CacheError;

// == Memory Store ==
/// LRU-bounded store with TTL expiry.
#[derive(Debug)]
pub struct MemoryStore {
    entries: LruCache<String, CacheEntry>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` values (minimum one).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    // == Set ==
    /// Stores a value for `ttl`, replacing any existing entry and resetting its
    /// expiry. At capacity the least recently used entry is evicted.
    pub fn set(&mut self, key: String, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::OperationFailed("ttl must be positive".to_string()));
        }

        self.entries.put(key, CacheEntry::new(value, ttl));
        Ok(())
    }

    // == Get ==
    /// Returns the value if present and not expired. Expired entries are dropped.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.is_expired() => true,
            Some(entry) => return Some(entry.value.clone()),
            None => return None,
        };

        if expired {
            self.entries.pop(key);
        }
        None
    }

    // == Time To Live ==
    /// Remaining lifetime of a live entry, without touching LRU order.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.entries
            .peek(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining)
    }

    // == Delete ==
    /// Removes an entry. Returns whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.pop(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.pop(key);
        }

        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
