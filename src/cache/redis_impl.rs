//! Redis settings cache.
//!
//! One string key per user holding the encoded snapshot, written with
//! `SET ... EX` so Redis owns expiry.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use super::{decode_settings, encode_settings, settings_key, CacheResult, SettingsCache};
use crate::error::CacheError;
use crate::models::Settings;

/// Maps Redis errors to CacheError.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

/// Redis backend using a connection manager, which reconnects on its own.
#[derive(Clone)]
pub struct RedisSettingsCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisSettingsCache {
    /// Connects to Redis.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl SettingsCache for RedisSettingsCache {
    async fn get(&self, user_id: &str) -> CacheResult<Option<Settings>> {
        let mut conn = self.conn.clone();
        let raw: Option<Vec<u8>> = conn
            .get(settings_key(user_id))
            .await
            .map_err(map_redis_error)?;
        raw.map(|bytes| decode_settings(&bytes)).transpose()
    }

    async fn set(&self, user_id: &str, settings: &Settings, ttl: Duration) -> CacheResult<()> {
        let bytes = encode_settings(settings)?;
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(settings_key(user_id), bytes, ttl.as_secs().max(1))
            .await
            .map_err(map_redis_error)
    }

    async fn invalidate(&self, user_id: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(settings_key(user_id))
            .await
            .map_err(map_redis_error)
    }
}
