//! Application wiring
//!
//! Builds the collaborators selected by [`Config`], the core services on top
//! of them, and the background tasks they rely on.

use std::sync::Arc;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::AppState;
use crate::cache::{
    CacheStats, MemorySettingsCache, RedisSettingsCache, SettingsCache, SETTINGS_TTL,
};
use crate::config::Config;
use crate::diagnostics::{Diagnostics, TracingSink};
use crate::downstream::{DownstreamClient, HttpDownstreamClient};
use crate::events::{BroadcastPublisher, EventPublisher, RedisStreamPublisher};
use crate::service::{ReviewDispatcher, SettingsService};
use crate::tasks::{spawn_cleanup_task, spawn_populate_worker, PopulateConfig};

/// Buffer for the in-process review bus.
const BROADCAST_CAPACITY: usize = 1024;

/// The three collaborators the core depends on.
pub struct Backends {
    pub cache: Arc<dyn SettingsCache>,
    pub downstream: Arc<dyn DownstreamClient>,
    pub publisher: Arc<dyn EventPublisher>,
}

/// A wired gateway: handler state plus background task handles.
pub struct App {
    pub state: AppState,
    /// Finishes once every clone of `state` is dropped and pending cache
    /// writes are done
    pub populate_handle: JoinHandle<()>,
    /// Present when the in-memory cache is in use
    pub cleanup_handle: Option<JoinHandle<()>>,
}

impl App {
    /// Connects the backends named by `config` and wires the services.
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let downstream = HttpDownstreamClient::new(
            config.customer_service_url.clone(),
            config.downstream_timeout(),
        )
        .context("failed to build profile service client")?;

        let (cache, publisher, cleanup_handle): (
            Arc<dyn SettingsCache>,
            Arc<dyn EventPublisher>,
            Option<JoinHandle<()>>,
        ) = match &config.redis_url {
            Some(url) => {
                let cache = RedisSettingsCache::connect(url)
                    .await
                    .context("failed to connect settings cache to redis")?;
                let publisher = RedisStreamPublisher::connect(url, config.review_stream.clone())
                    .await
                    .context("failed to connect review publisher to redis")?;
                info!(stream = %config.review_stream, "using redis cache and review stream");
                let cache: Arc<dyn SettingsCache> = Arc::new(cache);
                let publisher: Arc<dyn EventPublisher> = Arc::new(publisher);
                (cache, publisher, None)
            }
            None => {
                let cache = MemorySettingsCache::new(config.max_cache_entries);
                let cleanup = spawn_cleanup_task(cache.clone(), config.cleanup_period());
                info!(
                    max_entries = config.max_cache_entries,
                    "using in-memory cache and in-process review bus"
                );
                let cache: Arc<dyn SettingsCache> = Arc::new(cache);
                let publisher: Arc<dyn EventPublisher> =
                    Arc::new(BroadcastPublisher::new(BROADCAST_CAPACITY));
                (cache, publisher, Some(cleanup))
            }
        };

        let backends = Backends {
            cache,
            downstream: Arc::new(downstream),
            publisher,
        };
        let populate = PopulateConfig {
            capacity: config.populate_queue_capacity,
            concurrency: config.populate_concurrency,
            ttl: SETTINGS_TTL,
        };
        let diagnostics = Diagnostics::new().with_sink(Arc::new(TracingSink));

        let mut app = Self::assemble(backends, diagnostics, populate);
        app.cleanup_handle = cleanup_handle;
        Ok(app)
    }

    /// Wires services over already-built backends.
    ///
    /// A [`CacheStats`] sink is always added to `diagnostics` and exposed
    /// through the returned state.
    pub fn assemble(backends: Backends, diagnostics: Diagnostics, populate: PopulateConfig) -> Self {
        let stats = Arc::new(CacheStats::new());
        let diagnostics = diagnostics.with_sink(stats.clone());

        let (queue, populate_handle) =
            spawn_populate_worker(backends.cache.clone(), diagnostics.clone(), populate);

        let settings = SettingsService::new(
            backends.cache,
            backends.downstream,
            queue,
            diagnostics.clone(),
        );
        let reviews = ReviewDispatcher::new(backends.publisher, diagnostics);

        Self {
            state: AppState::new(settings, reviews, stats),
            populate_handle,
            cleanup_handle: None,
        }
    }
}
