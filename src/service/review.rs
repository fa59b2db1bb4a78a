//! Review Dispatcher
//!
//! Turns an analysis request into a uniquely identified event on the bus and
//! acknowledges it straight away. Processing happens elsewhere.

use std::sync::Arc;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{PublishError, Result};
use crate::events::EventPublisher;
use crate::models::{AnalyzeReviewRequest, AnalyzeReviewResponse, ReviewPayload};

pub struct ReviewDispatcher {
    publisher: Arc<dyn EventPublisher>,
    diagnostics: Diagnostics,
}

impl ReviewDispatcher {
    pub fn new(publisher: Arc<dyn EventPublisher>, diagnostics: Diagnostics) -> Self {
        Self {
            publisher,
            diagnostics,
        }
    }

    /// Publishes the review keyed by user id and returns a `QUEUED` ack.
    ///
    /// # Errors
    /// If the event cannot be published no review id is handed out; the
    /// review was not queued.
    pub async fn analyze_review(&self, req: &AnalyzeReviewRequest) -> Result<AnalyzeReviewResponse> {
        let payload = ReviewPayload::new(&req.user_id, &req.text, &req.source);

        let sent = match serde_json::to_vec(&payload) {
            Ok(bytes) => self.publisher.send(&req.user_id, &bytes).await,
            Err(e) => Err(PublishError::Serialization(e.to_string())),
        };

        if let Err(error) = sent {
            self.diagnostics.emit(Diagnostic::ReviewPublishFailed {
                user_id: req.user_id.clone(),
                error: error.clone(),
            });
            return Err(error.into());
        }

        self.diagnostics.emit(Diagnostic::ReviewQueued {
            review_id: payload.review_id,
            user_id: req.user_id.clone(),
        });
        Ok(AnalyzeReviewResponse::queued(payload.review_id))
    }
}
