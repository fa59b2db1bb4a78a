//! Cache Module
//!
//! The settings cache contract, its key scheme and wire encoding, and the
//! in-memory and Redis backends.

mod codec;
mod entry;
mod memory;
mod redis_impl;
mod stats;
mod store;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;
use crate::models::Settings;

// Re-export public types
pub use codec::{decode_settings, encode_settings};
pub use entry::CacheEntry;
pub use memory::MemorySettingsCache;
pub use redis_impl::{map_redis_error, RedisSettingsCache};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::MemoryStore;

// == Public Constants ==
/// Lifetime of every cached settings snapshot.
pub const SETTINGS_TTL: Duration = Duration::from_secs(600);

/// Prefix shared by every settings key.
pub const SETTINGS_KEY_PREFIX: &str = "user:settings:";

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Returns the cache key holding `user_id`'s settings.
pub fn settings_key(user_id: &str) -> String {
    format!("{SETTINGS_KEY_PREFIX}{user_id}")
}

// == Settings Cache ==
/// Per-user settings cache.
///
/// A missing entry is a normal state and is reported as `Ok(None)`. Any user
/// id that maps to a key must be storable; backends impose no length limit.
#[async_trait]
pub trait SettingsCache: Send + Sync {
    /// Reads the cached snapshot for `user_id`.
    async fn get(&self, user_id: &str) -> CacheResult<Option<Settings>>;

    /// Stores `settings` for `user_id`, replacing any previous entry.
    async fn set(&self, user_id: &str, settings: &Settings, ttl: Duration) -> CacheResult<()>;

    /// Removes the entry for `user_id`. Removing an absent entry succeeds.
    async fn invalidate(&self, user_id: &str) -> CacheResult<()>;
}
