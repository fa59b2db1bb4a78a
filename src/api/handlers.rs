//! API Handlers
//!
//! HTTP request handlers mapping the transport onto the core operations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::cache::CacheStats;
use crate::error::ApiError;
use crate::models::{
    AnalyzeReviewRequest, AnalyzeReviewResponse, CreateUserProfileRequest, GetSettingsRequest,
    HealthResponse, Outcome, Profile, Settings, StatsResponse, UpdateSettingsRequest,
};
use crate::service::{ReviewDispatcher, SettingsService};

/// Header carrying the caller's user id when it is not in the path or body.
pub const USER_ID_HEADER: &str = "x-user-id";

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<SettingsService>,
    pub reviews: Arc<ReviewDispatcher>,
    pub stats: Arc<CacheStats>,
}

impl AppState {
    pub fn new(settings: SettingsService, reviews: ReviewDispatcher, stats: Arc<CacheStats>) -> Self {
        Self {
            settings: Arc::new(settings),
            reviews: Arc::new(reviews),
            stats,
        }
    }
}

fn header_user_id(headers: &HeaderMap) -> String {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn completed<T>(outcome: Outcome<T>) -> ApiResult<T> {
    outcome
        .into_completed()
        .ok_or_else(|| ApiError::InvalidRequest("user_id is required".to_string()))
}

/// Handler for GET /api/v1/settings/:user_id
pub async fn get_settings_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Settings>> {
    let outcome = state
        .settings
        .get_settings(&GetSettingsRequest::new(user_id))
        .await?;
    Ok(Json(completed(outcome)?))
}

/// Handler for GET /api/v1/settings
///
/// Reads the user id from the `X-User-ID` header.
pub async fn get_own_settings_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Settings>> {
    let req = GetSettingsRequest::new(header_user_id(&headers));
    let outcome = state.settings.get_settings(&req).await?;
    Ok(Json(completed(outcome)?))
}

/// Handler for PUT /api/v1/settings
///
/// `user_id` comes from the body, or from `X-User-ID` when the body omits it.
pub async fn update_settings_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut req): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<Settings>> {
    if req.user_id.is_empty() {
        req.user_id = header_user_id(&headers);
    }

    let outcome = state.settings.update_settings(&req).await?;
    Ok(Json(completed(outcome)?))
}

/// Handler for POST /api/v1/reviews
pub async fn analyze_review_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeReviewRequest>,
) -> ApiResult<(StatusCode, Json<AnalyzeReviewResponse>)> {
    let ack = state.reviews.analyze_review(&req).await?;
    Ok((StatusCode::ACCEPTED, Json(ack)))
}

/// Handler for POST /api/v1/profiles
pub async fn create_profile_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateUserProfileRequest>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let profile = state.settings.create_user_profile(&req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.stats.snapshot()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
