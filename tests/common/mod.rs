//! Shared test doubles: in-memory fakes for the cache, the profile service and
//! the event bus, plus a recording diagnostics sink.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Barrier, Semaphore};

use settings_gateway::cache::{CacheResult, SettingsCache, SETTINGS_TTL};
use settings_gateway::diagnostics::{Diagnostic, Diagnostics, DiagnosticsSink};
use settings_gateway::downstream::DownstreamClient;
use settings_gateway::error::{CacheError, DownstreamError, PublishError};
use settings_gateway::events::EventPublisher;
use settings_gateway::models::{
    CreateUserProfileRequest, GetSettingsRequest, Profile, Settings, UpdateSettingsRequest,
};
use settings_gateway::tasks::PopulateConfig;
use settings_gateway::{App, Backends};

/// Cross-collaborator call order, e.g. `["downstream.update", "cache.invalidate"]`.
pub type Journal = Arc<Mutex<Vec<&'static str>>>;

// == Fake Cache ==

#[derive(Debug, Clone, PartialEq)]
pub enum CacheCall {
    Get(String),
    Set(String, Settings, Duration),
    Invalidate(String),
}

#[derive(Default)]
pub struct FakeCache {
    entries: Mutex<HashMap<String, (Settings, Duration)>>,
    calls: Mutex<Vec<CacheCall>>,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_invalidate: AtomicBool,
    /// When present, each `set` waits for a permit before writing
    set_gate: Option<Arc<Semaphore>>,
    journal: Journal,
}

impl FakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose writes block until `gate` hands out permits.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            set_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_entry(self, user_id: &str, settings: Settings) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert(user_id.to_string(), (settings, SETTINGS_TTL));
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn failing_reads(self) -> Self {
        self.fail_get.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_set.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_invalidations(self) -> Self {
        self.fail_invalidate.store(true, Ordering::SeqCst);
        self
    }

    pub fn entry(&self, user_id: &str) -> Option<(Settings, Duration)> {
        self.entries.lock().unwrap().get(user_id).cloned()
    }

    pub fn calls(&self) -> Vec<CacheCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> usize {
        self.count(|c| matches!(c, CacheCall::Get(_)))
    }

    pub fn set_calls(&self) -> usize {
        self.count(|c| matches!(c, CacheCall::Set(..)))
    }

    pub fn invalidate_calls(&self) -> usize {
        self.count(|c| matches!(c, CacheCall::Invalidate(_)))
    }

    fn count(&self, pred: impl Fn(&CacheCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: CacheCall, step: &'static str) {
        self.calls.lock().unwrap().push(call);
        self.journal.lock().unwrap().push(step);
    }
}

#[async_trait]
impl SettingsCache for FakeCache {
    async fn get(&self, user_id: &str) -> CacheResult<Option<Settings>> {
        self.record(CacheCall::Get(user_id.to_string()), "cache.get");
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("connection refused".into()));
        }
        Ok(self.entry(user_id).map(|(settings, _)| settings))
    }

    async fn set(&self, user_id: &str, settings: &Settings, ttl: Duration) -> CacheResult<()> {
        self.record(
            CacheCall::Set(user_id.to_string(), settings.clone(), ttl),
            "cache.set",
        );
        if let Some(gate) = &self.set_gate {
            gate.acquire().await.unwrap().forget();
        }
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(CacheError::OperationFailed("OOM command not allowed".into()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(user_id.to_string(), (settings.clone(), ttl));
        Ok(())
    }

    async fn invalidate(&self, user_id: &str) -> CacheResult<()> {
        self.record(CacheCall::Invalidate(user_id.to_string()), "cache.invalidate");
        if self.fail_invalidate.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("broken pipe".into()));
        }
        self.entries.lock().unwrap().remove(user_id);
        Ok(())
    }
}

// == Fake Downstream ==

pub struct FakeDownstream {
    settings: Mutex<Result<Settings, DownstreamError>>,
    updated: Mutex<Result<Settings, DownstreamError>>,
    profile: Mutex<Result<Profile, DownstreamError>>,
    get_calls: AtomicUsize,
    update_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    get_barrier: Option<Arc<Barrier>>,
    get_delay: Option<Duration>,
    journal: Journal,
}

impl FakeDownstream {
    /// Answers every read with `settings`; updates echo the request.
    pub fn returning(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(Ok(settings.clone())),
            updated: Mutex::new(Ok(settings)),
            profile: Mutex::new(Err(DownstreamError::Unavailable("not configured".into()))),
            get_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            get_barrier: None,
            get_delay: None,
            journal: Journal::default(),
        }
    }

    pub fn failing(error: DownstreamError) -> Self {
        let downstream = Self::returning(Settings::new("", "", ""));
        downstream.fail_reads(error.clone());
        downstream.fail_updates(error.clone());
        *downstream.profile.lock().unwrap() = Err(error);
        downstream
    }

    pub fn with_get_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.get_barrier = Some(barrier);
        self
    }

    pub fn with_get_delay(mut self, delay: Duration) -> Self {
        self.get_delay = Some(delay);
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        *self.profile.lock().unwrap() = Ok(profile);
        self
    }

    pub fn set_settings(&self, settings: Settings) {
        *self.settings.lock().unwrap() = Ok(settings);
    }

    pub fn set_updated(&self, settings: Settings) {
        *self.updated.lock().unwrap() = Ok(settings);
    }

    pub fn fail_reads(&self, error: DownstreamError) {
        *self.settings.lock().unwrap() = Err(error);
    }

    pub fn fail_updates(&self, error: DownstreamError) {
        *self.updated.lock().unwrap() = Err(error);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DownstreamClient for FakeDownstream {
    async fn get_settings(&self, _req: &GetSettingsRequest) -> Result<Settings, DownstreamError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.lock().unwrap().push("downstream.get");
        if let Some(barrier) = &self.get_barrier {
            barrier.wait().await;
        }
        if let Some(delay) = self.get_delay {
            tokio::time::sleep(delay).await;
        }
        self.settings.lock().unwrap().clone()
    }

    async fn update_settings(
        &self,
        _req: &UpdateSettingsRequest,
    ) -> Result<Settings, DownstreamError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.lock().unwrap().push("downstream.update");
        self.updated.lock().unwrap().clone()
    }

    async fn create_user_profile(
        &self,
        _req: &CreateUserProfileRequest,
    ) -> Result<Profile, DownstreamError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile.lock().unwrap().clone()
    }
}

// == Fake Publisher ==

#[derive(Default)]
pub struct FakePublisher {
    sent: Mutex<Vec<(String, Vec<u8>)>>,
    failure: Option<PublishError>,
}

impl FakePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: PublishError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, Vec<u8>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for FakePublisher {
    async fn send(&self, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.sent
            .lock()
            .unwrap()
            .push((key.to_string(), payload.to_vec()));
        Ok(())
    }
}

// == Recording Sink ==

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Diagnostic) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn emit(&self, event: &Diagnostic) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// == Harness ==

pub struct Harness {
    pub app: App,
    pub cache: Arc<FakeCache>,
    pub downstream: Arc<FakeDownstream>,
    pub publisher: Arc<FakePublisher>,
    pub sink: Arc<RecordingSink>,
}

pub fn test_populate_config() -> PopulateConfig {
    PopulateConfig {
        capacity: 16,
        concurrency: 4,
        ttl: SETTINGS_TTL,
    }
}

pub fn harness(cache: FakeCache, downstream: FakeDownstream, publisher: FakePublisher) -> Harness {
    harness_with(cache, downstream, publisher, test_populate_config())
}

pub fn harness_with(
    cache: FakeCache,
    downstream: FakeDownstream,
    publisher: FakePublisher,
    populate: PopulateConfig,
) -> Harness {
    let cache = Arc::new(cache);
    let downstream = Arc::new(downstream);
    let publisher = Arc::new(publisher);
    let sink = Arc::new(RecordingSink::default());

    let backends = Backends {
        cache: cache.clone(),
        downstream: downstream.clone(),
        publisher: publisher.clone(),
    };
    let app = App::assemble(backends, Diagnostics::new().with_sink(sink.clone()), populate);

    Harness {
        app,
        cache,
        downstream,
        publisher,
        sink,
    }
}

/// Polls `condition` every few milliseconds for up to two seconds.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

pub fn dark_settings() -> Settings {
    Settings::new("dark", "gpt-4", "monospace")
}
