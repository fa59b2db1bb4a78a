//! Events Module
//!
//! Contract for the message bus carrying review events, with a Redis Streams
//! backend and an in-process broadcast backend.

mod broadcast;
mod redis_stream;

use async_trait::async_trait;

use crate::error::PublishError;

pub use broadcast::{BroadcastPublisher, PublishedEvent};
pub use redis_stream::RedisStreamPublisher;

/// Delivers a keyed payload to the bus.
///
/// Events sharing a key must stay in order relative to each other.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn send(&self, key: &str, payload: &[u8]) -> Result<(), PublishError>;
}
