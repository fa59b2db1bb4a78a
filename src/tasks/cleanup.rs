//! TTL Sweeper Task
//!
//! Periodically purges expired entries from the in-memory settings cache.
//! Reads already ignore expired entries; the sweep only reclaims memory for
//! users who stopped reading.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemorySettingsCache;

/// Spawns a background task that periodically purges expired entries.
///
/// # Arguments
/// * `cache` - the in-memory cache to sweep
/// * `interval` - time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(cache: MemorySettingsCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting settings cache sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;
            if removed > 0 {
                info!(removed, "settings cache sweep removed expired entries");
            } else {
                debug!("settings cache sweep found no expired entries");
            }
        }
    })
}
