//! Request DTOs
//!
//! Inputs to the core operations, decoded from the HTTP transport.

use serde::{Deserialize, Serialize};

/// Input to GetSettings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSettingsRequest {
    #[serde(default)]
    pub user_id: String,
}

impl GetSettingsRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Input to UpdateSettings.
///
/// `user_id` may be omitted from the body; the handler then falls back to the
/// `X-User-ID` header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub user_id: String,
    pub theme: String,
    pub picked_model: String,
    pub font: String,
}

impl UpdateSettingsRequest {
    pub fn new(
        user_id: impl Into<String>,
        theme: impl Into<String>,
        picked_model: impl Into<String>,
        font: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            theme: theme.into(),
            picked_model: picked_model.into(),
            font: font.into(),
        }
    }
}

/// Input to AnalyzeReview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeReviewRequest {
    #[serde(default)]
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub source: String,
}

impl AnalyzeReviewRequest {
    pub fn new(
        user_id: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Input to CreateUserProfile, forwarded verbatim to the profile service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserProfileRequest {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

impl CreateUserProfileRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.user_id.trim().is_empty() {
            return Some("user_id cannot be empty".to_string());
        }
        if self.email.trim().is_empty() {
            return Some("email cannot be empty".to_string());
        }
        None
    }
}
