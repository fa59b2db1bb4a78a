//! Cache Statistics Module
//!
//! Counters fed from the diagnostics stream and served on `/stats`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticsSink};

// == Cache Stats ==
/// Lock-free counters shared between request handlers and the population queue.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    degraded_reads: AtomicU64,
    populations_scheduled: AtomicU64,
    populations_completed: AtomicU64,
    populations_dropped: AtomicU64,
    population_failures: AtomicU64,
    invalidations: AtomicU64,
    invalidation_failures: AtomicU64,
    reviews_queued: AtomicU64,
    review_failures: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub degraded_reads: u64,
    pub populations_scheduled: u64,
    pub populations_completed: u64,
    pub populations_dropped: u64,
    pub population_failures: u64,
    pub invalidations: u64,
    pub invalidation_failures: u64,
    pub reviews_queued: u64,
    pub review_failures: u64,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    ///
    /// Degraded reads count as misses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        StatsSnapshot {
            hits: load(&self.hits),
            misses: load(&self.misses),
            degraded_reads: load(&self.degraded_reads),
            populations_scheduled: load(&self.populations_scheduled),
            populations_completed: load(&self.populations_completed),
            populations_dropped: load(&self.populations_dropped),
            population_failures: load(&self.population_failures),
            invalidations: load(&self.invalidations),
            invalidation_failures: load(&self.invalidation_failures),
            reviews_queued: load(&self.reviews_queued),
            review_failures: load(&self.review_failures),
        }
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl DiagnosticsSink for CacheStats {
    fn emit(&self, event: &Diagnostic) {
        match event {
            Diagnostic::CacheHit { .. } => bump(&self.hits),
            Diagnostic::CacheMiss { .. } => bump(&self.misses),
            Diagnostic::CacheReadFailed { .. } => {
                bump(&self.degraded_reads);
                bump(&self.misses);
            }
            Diagnostic::PopulateScheduled { .. } => bump(&self.populations_scheduled),
            Diagnostic::PopulateDropped { .. } => bump(&self.populations_dropped),
            Diagnostic::CachePopulated { .. } => bump(&self.populations_completed),
            Diagnostic::CacheWriteFailed { .. } => bump(&self.population_failures),
            Diagnostic::CacheInvalidated { .. } => bump(&self.invalidations),
            Diagnostic::CacheInvalidateFailed { .. } => bump(&self.invalidation_failures),
            Diagnostic::ReviewQueued { .. } => bump(&self.reviews_queued),
            Diagnostic::ReviewPublishFailed { .. } => bump(&self.review_failures),
        }
    }
}
