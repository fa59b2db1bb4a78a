//! Redis Streams event publisher.
//!
//! Every review is appended to one stream as `key`/`payload` fields. A single
//! stream keeps each user's events ordered; consumer groups handle fan-out.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use super::EventPublisher;
use crate::error::PublishError;

/// [`EventPublisher`] appending to a Redis stream with `XADD`.
#[derive(Clone)]
pub struct RedisStreamPublisher {
    conn: redis::aio::ConnectionManager,
    stream: String,
}

impl RedisStreamPublisher {
    /// Connects to Redis and targets `stream`.
    pub async fn connect(url: &str, stream: impl Into<String>) -> Result<Self, PublishError> {
        let client =
            redis::Client::open(url).map_err(|e| PublishError::SendFailed(e.to_string()))?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(|e| PublishError::SendFailed(e.to_string()))?;
        Ok(Self::from_manager(conn, stream))
    }

    pub fn from_manager(conn: redis::aio::ConnectionManager, stream: impl Into<String>) -> Self {
        Self {
            conn,
            stream: stream.into(),
        }
    }
}

#[async_trait]
impl EventPublisher for RedisStreamPublisher {
    async fn send(&self, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        let mut conn = self.conn.clone();
        let fields: [(&str, &[u8]); 2] = [("key", key.as_bytes()), ("payload", payload)];
        let entry_id: String = conn
            .xadd(&self.stream, "*", &fields)
            .await
            .map_err(|e| PublishError::SendFailed(e.to_string()))?;

        debug!(stream = %self.stream, entry_id = %entry_id, key = %key, "event appended");
        Ok(())
    }
}
