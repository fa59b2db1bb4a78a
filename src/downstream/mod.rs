//! Downstream Module
//!
//! Contract for the profile service that owns settings, plus its HTTP client.

mod http;

use async_trait::async_trait;

use crate::error::DownstreamError;
use crate::models::{
    CreateUserProfileRequest, GetSettingsRequest, Profile, Settings, UpdateSettingsRequest,
};

pub use http::HttpDownstreamClient;

/// The authoritative source of settings and profiles.
///
/// Implementations make exactly one call per method; retrying is left to the
/// caller.
#[async_trait]
pub trait DownstreamClient: Send + Sync {
    async fn get_settings(&self, req: &GetSettingsRequest) -> Result<Settings, DownstreamError>;

    async fn update_settings(
        &self,
        req: &UpdateSettingsRequest,
    ) -> Result<Settings, DownstreamError>;

    async fn create_user_profile(
        &self,
        req: &CreateUserProfileRequest,
    ) -> Result<Profile, DownstreamError>;
}
