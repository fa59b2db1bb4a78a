//! Cache Population Queue
//!
//! Detached writes that fill the settings cache after a miss. Jobs go through
//! a bounded queue to a dispatcher task that runs each write on its own tokio
//! task, at most `concurrency` at a time. Writes are never tied to the request
//! that scheduled them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SettingsCache;
use crate::diagnostics::{Diagnostic, Diagnostics, DropReason};
use crate::models::Settings;

/// Upper bound on in-flight writes; the drain acquires them all at once.
const MAX_CONCURRENCY: usize = if Semaphore::MAX_PERMITS < u32::MAX as usize {
    Semaphore::MAX_PERMITS
} else {
    u32::MAX as usize
};

/// A settings snapshot waiting to be written.
#[derive(Debug, Clone)]
pub struct PopulateJob {
    pub user_id: String,
    pub settings: Settings,
}

/// Sizing for the population queue.
#[derive(Debug, Clone, Copy)]
pub struct PopulateConfig {
    /// Jobs that may wait for a free writer
    pub capacity: usize,
    /// Writes allowed in flight at once
    pub concurrency: usize,
    /// Lifetime given to each written entry
    pub ttl: Duration,
}

/// Handle for scheduling population jobs.
///
/// Submission never waits. The dispatcher exits once every handle is dropped
/// and the queue is drained.
#[derive(Debug, Clone)]
pub struct PopulateQueue {
    tx: mpsc::Sender<PopulateJob>,
    diagnostics: Diagnostics,
}

impl PopulateQueue {
    /// Schedules a write of `settings` for `user_id`.
    ///
    /// Returns false if the job was dropped because the queue is full or shut
    /// down; a `PopulateDropped` diagnostic is emitted in that case.
    pub fn submit(&self, user_id: &str, settings: Settings) -> bool {
        let job = PopulateJob {
            user_id: user_id.to_string(),
            settings,
        };

        let reason = match self.tx.try_send(job) {
            Ok(()) => {
                self.diagnostics.emit(Diagnostic::PopulateScheduled {
                    user_id: user_id.to_string(),
                });
                return true;
            }
            Err(TrySendError::Full(_)) => DropReason::QueueFull,
            Err(TrySendError::Closed(_)) => DropReason::QueueClosed,
        };

        self.diagnostics.emit(Diagnostic::PopulateDropped {
            user_id: user_id.to_string(),
            reason,
        });
        false
    }
}

/// Spawns the population dispatcher.
///
/// # Returns
/// The submission handle and the dispatcher's JoinHandle. Awaiting the handle
/// after dropping every `PopulateQueue` waits for queued and in-flight writes.
pub fn spawn_populate_worker(
    cache: Arc<dyn SettingsCache>,
    diagnostics: Diagnostics,
    config: PopulateConfig,
) -> (PopulateQueue, JoinHandle<()>) {
    let capacity = config.capacity.clamp(1, Semaphore::MAX_PERMITS);
    let concurrency = config.concurrency.clamp(1, MAX_CONCURRENCY);
    let (tx, mut rx) = mpsc::channel::<PopulateJob>(capacity);
    let permits = Arc::new(Semaphore::new(concurrency));
    let queue = PopulateQueue {
        tx,
        diagnostics: diagnostics.clone(),
    };

    let handle = tokio::spawn(async move {
        info!(
            capacity,
            concurrency, "cache population worker started"
        );

        while let Some(job) = rx.recv().await {
            let Ok(permit) = permits.clone().acquire_owned().await else {
                break;
            };
            let cache = cache.clone();
            let diagnostics = diagnostics.clone();
            let ttl = config.ttl;

            tokio::spawn(async move {
                let _permit = permit;
                let PopulateJob { user_id, settings } = job;
                match cache.set(&user_id, &settings, ttl).await {
                    Ok(()) => diagnostics.emit(Diagnostic::CachePopulated { user_id }),
                    Err(error) => diagnostics.emit(Diagnostic::CacheWriteFailed { user_id, error }),
                }
            });
        }

        // Wait for in-flight writes before reporting completion
        let _ = permits.acquire_many(concurrency as u32).await;
        debug!("cache population worker drained");
    });

    (queue, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemorySettingsCache, SETTINGS_TTL};

    fn config(capacity: usize) -> PopulateConfig {
        PopulateConfig {
            capacity,
            concurrency: 4,
            ttl: SETTINGS_TTL,
        }
    }

    #[tokio::test]
    async fn test_submitted_job_reaches_cache() {
        let cache = MemorySettingsCache::new(10);
        let (queue, handle) =
            spawn_populate_worker(Arc::new(cache.clone()), Diagnostics::new(), config(8));

        let settings = Settings::new("dark", "gpt-4", "monospace");
        assert!(queue.submit("u1", settings.clone()));

        drop(queue);
        handle.await.unwrap();

        assert_eq!(cache.get("u1").await.unwrap(), Some(settings));
    }

    #[tokio::test]
    async fn test_dispatcher_exits_after_last_handle_dropped() {
        let (queue, handle) = spawn_populate_worker(
            Arc::new(MemorySettingsCache::new(10)),
            Diagnostics::new(),
            config(8),
        );
        let clone = queue.clone();
        drop(queue);
        assert!(!handle.is_finished());

        drop(clone);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("dispatcher should stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_is_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let queue = PopulateQueue {
            tx,
            diagnostics: Diagnostics::new(),
        };

        assert!(!queue.submit("u1", Settings::new("a", "b", "c")));
    }

    #[tokio::test]
    async fn test_full_queue_drops_job() {
        let (tx, _rx) = mpsc::channel(1);
        let queue = PopulateQueue {
            tx,
            diagnostics: Diagnostics::new(),
        };

        assert!(queue.submit("u1", Settings::new("a", "b", "c")));
        assert!(!queue.submit("u2", Settings::new("a", "b", "c")));
    }

    #[tokio::test]
    async fn test_oversized_sizing_is_clamped() {
        let cache = MemorySettingsCache::new(10);
        let (queue, handle) = spawn_populate_worker(
            Arc::new(cache.clone()),
            Diagnostics::new(),
            PopulateConfig {
                capacity: usize::MAX,
                concurrency: usize::MAX,
                ttl: SETTINGS_TTL,
            },
        );

        let settings = Settings::new("dark", "gpt-4", "monospace");
        assert!(queue.submit("u1", settings.clone()));
        drop(queue);
        handle.await.unwrap();

        assert_eq!(cache.get("u1").await.unwrap(), Some(settings));
    }
}
