//! HTTP client for the profile service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::DownstreamClient;
use crate::error::DownstreamError;
use crate::models::{
    CreateUserProfileRequest, GetSettingsRequest, Profile, Settings, UpdateSettingsRequest,
};

#[derive(Serialize)]
struct SettingsBody<'a> {
    theme: &'a str,
    picked_model: &'a str,
    font: &'a str,
}

/// JSON-over-HTTP [`DownstreamClient`].
#[derive(Debug, Clone)]
pub struct HttpDownstreamClient {
    client: Client,
    base_url: String,
}

impl HttpDownstreamClient {
    /// Builds a client rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DownstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DownstreamError::Unavailable(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Uses a preconfigured reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn settings_url(&self, user_id: &str) -> String {
        format!(
            "{}/api/v1/users/{}/settings",
            self.base_url,
            urlencoding::encode(user_id)
        )
    }
}

fn transport_error(err: reqwest::Error) -> DownstreamError {
    DownstreamError::Unavailable(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DownstreamError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(DownstreamError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| DownstreamError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl DownstreamClient for HttpDownstreamClient {
    async fn get_settings(&self, req: &GetSettingsRequest) -> Result<Settings, DownstreamError> {
        debug!(user_id = %req.user_id, "fetching settings from profile service");
        let response = self
            .client
            .get(self.settings_url(&req.user_id))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn update_settings(
        &self,
        req: &UpdateSettingsRequest,
    ) -> Result<Settings, DownstreamError> {
        debug!(user_id = %req.user_id, "updating settings in profile service");
        let body = SettingsBody {
            theme: &req.theme,
            picked_model: &req.picked_model,
            font: &req.font,
        };
        let response = self
            .client
            .put(self.settings_url(&req.user_id))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn create_user_profile(
        &self,
        req: &CreateUserProfileRequest,
    ) -> Result<Profile, DownstreamError> {
        let response = self
            .client
            .post(format!("{}/api/v1/users", self.base_url))
            .json(req)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}
