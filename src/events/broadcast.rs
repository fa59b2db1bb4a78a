//! In-process event bus.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use super::EventPublisher;
use crate::error::PublishError;

/// An event as seen by in-process subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    pub key: String,
    pub payload: Vec<u8>,
}

/// [`EventPublisher`] backed by a tokio broadcast channel.
///
/// A single channel preserves publish order for every key. With no
/// subscribers the event is simply not retained.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<PublishedEvent>,
}

impl BroadcastPublisher {
    /// Creates a bus buffering up to `capacity` events per lagging subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastPublisher {
    async fn send(&self, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        let event = PublishedEvent {
            key: key.to_string(),
            payload: payload.to_vec(),
        };
        match self.tx.send(event) {
            Ok(receivers) => debug!(key = %key, receivers, "event broadcast"),
            Err(_) => debug!(key = %key, "event broadcast with no subscribers"),
        }
        Ok(())
    }
}
