//! Diagnostics Module
//!
//! Structured events for cache decisions and non-fatal faults. The core emits
//! into a [`Diagnostics`] fan-out; sinks decide where the events end up.

mod tracing_sink;

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{CacheError, PublishError};

pub use tracing_sink::TracingSink;

// == Diagnostic ==
/// Something the core observed while serving a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    CacheHit {
        user_id: String,
    },
    CacheMiss {
        user_id: String,
    },
    /// Cache read failed; the request fell through to the profile service
    CacheReadFailed {
        user_id: String,
        error: CacheError,
    },
    PopulateScheduled {
        user_id: String,
    },
    PopulateDropped {
        user_id: String,
        reason: DropReason,
    },
    CachePopulated {
        user_id: String,
    },
    CacheWriteFailed {
        user_id: String,
        error: CacheError,
    },
    CacheInvalidated {
        user_id: String,
    },
    CacheInvalidateFailed {
        user_id: String,
        error: CacheError,
    },
    ReviewQueued {
        review_id: Uuid,
        user_id: String,
    },
    ReviewPublishFailed {
        user_id: String,
        error: PublishError,
    },
}

/// Why a population job never reached the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    QueueFull,
    QueueClosed,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::QueueFull => "queue_full",
            DropReason::QueueClosed => "queue_closed",
        }
    }
}

// == Sink ==
/// Receives diagnostics. Implementations must not block.
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, event: &Diagnostic);
}

// == Fan-out ==
/// Cloneable handle forwarding each event to every registered sink.
#[derive(Clone, Default)]
pub struct Diagnostics {
    sinks: Vec<Arc<dyn DiagnosticsSink>>,
}

impl Diagnostics {
    /// A handle with no sinks; events are discarded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn emit(&self, event: Diagnostic) {
        for sink in &self.sinks {
            sink.emit(&event);
        }
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
