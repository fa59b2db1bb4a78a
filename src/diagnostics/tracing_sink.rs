//! Tracing Sink
//!
//! Writes diagnostics as structured `tracing` events.

use tracing::{debug, info, warn};

use super::{Diagnostic, DiagnosticsSink};

/// Logs cache decisions at debug and degraded paths at warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, event: &Diagnostic) {
        match event {
            Diagnostic::CacheHit { user_id } => debug!(user_id = %user_id, "settings cache hit"),
            Diagnostic::CacheMiss { user_id } => debug!(user_id = %user_id, "settings cache miss"),
            Diagnostic::CacheReadFailed { user_id, error } => {
                warn!(user_id = %user_id, error = %error, "settings cache read failed, using profile service")
            }
            Diagnostic::PopulateScheduled { user_id } => {
                debug!(user_id = %user_id, "cache population scheduled")
            }
            Diagnostic::PopulateDropped { user_id, reason } => {
                warn!(user_id = %user_id, reason = reason.as_str(), "cache population dropped")
            }
            Diagnostic::CachePopulated { user_id } => {
                debug!(user_id = %user_id, "settings cache populated")
            }
            Diagnostic::CacheWriteFailed { user_id, error } => {
                warn!(user_id = %user_id, error = %error, "failed to populate settings cache")
            }
            Diagnostic::CacheInvalidated { user_id } => {
                debug!(user_id = %user_id, "settings cache invalidated")
            }
            Diagnostic::CacheInvalidateFailed { user_id, error } => {
                warn!(user_id = %user_id, error = %error, "failed to invalidate settings cache")
            }
            Diagnostic::ReviewQueued { review_id, user_id } => {
                info!(review_id = %review_id, user_id = %user_id, "review queued for analysis")
            }
            Diagnostic::ReviewPublishFailed { user_id, error } => {
                warn!(user_id = %user_id, error = %error, "failed to publish review event")
            }
        }
    }
}
