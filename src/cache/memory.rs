//! In-memory settings cache.
//!
//! Shares one [`MemoryStore`] behind a tokio `RwLock`, the same way the store
//! is shared with the background sweeper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    decode_settings, encode_settings, settings_key, CacheResult, MemoryStore, SettingsCache,
};
use crate::models::Settings;

/// Process-local [`SettingsCache`] used when no Redis URL is configured.
#[derive(Debug, Clone)]
pub struct MemorySettingsCache {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemorySettingsCache {
    /// Creates a cache bounded to `max_entries` users.
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new(max_entries))),
        }
    }

    /// Remaining lifetime of the entry for `user_id`, if one is live.
    pub async fn ttl_remaining(&self, user_id: &str) -> Option<Duration> {
        self.store.read().await.ttl_remaining(&settings_key(user_id))
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl SettingsCache for MemorySettingsCache {
    async fn get(&self, user_id: &str) -> CacheResult<Option<Settings>> {
        // Write lock: reads update LRU order and drop expired entries
        let bytes = self.store.write().await.get(&settings_key(user_id));
        bytes.map(|b| decode_settings(&b)).transpose()
    }

    async fn set(&self, user_id: &str, settings: &Settings, ttl: Duration) -> CacheResult<()> {
        let bytes = encode_settings(settings)?;
        self.store
            .write()
            .await
            .set(settings_key(user_id), bytes, ttl)
    }

    async fn invalidate(&self, user_id: &str) -> CacheResult<()> {
        self.store.write().await.delete(&settings_key(user_id));
        Ok(())
    }
}
