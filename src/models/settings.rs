//! Domain Models
//!
//! Settings snapshots, user profiles and the review event payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Settings ==
/// A user's preference snapshot as owned by the profile service.
///
/// The gateway only ever holds copies of this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// UI theme, e.g. "dark"
    pub theme: String,
    /// Model the user picked for analysis
    pub picked_model: String,
    /// Preferred font family
    pub font: String,
    /// Last modification time reported by the profile service
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Settings {
    /// Creates a settings snapshot without a modification time.
    pub fn new(
        theme: impl Into<String>,
        picked_model: impl Into<String>,
        font: impl Into<String>,
    ) -> Self {
        Self {
            theme: theme.into(),
            picked_model: picked_model.into(),
            font: font.into(),
            updated_at: None,
        }
    }

    /// Sets the modification time.
    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }
}

// == Profile ==
/// A user profile returned by the profile service on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// == Review Payload ==
/// Event published for every review-analysis request.
///
/// `review_id` is the correlation key for the asynchronous consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub review_id: Uuid,
    pub user_id: String,
    pub text: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewPayload {
    /// Builds a payload with a fresh random id, stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            review_id: Uuid::new_v4(),
            user_id: user_id.into(),
            text: text.into(),
            source: source.into(),
            created_at: Utc::now(),
        }
    }
}
