//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    analyze_review_handler, create_profile_handler, get_own_settings_handler,
    get_settings_handler, health_handler, stats_handler, update_settings_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/v1/settings/:user_id` - Read settings (cache-aside)
/// - `GET /api/v1/settings` - Read settings for the `X-User-ID` caller
/// - `PUT /api/v1/settings` - Update settings and invalidate the cache
/// - `POST /api/v1/reviews` - Queue a review for analysis
/// - `POST /api/v1/profiles` - Create a user profile
/// - `GET /stats` - Cache and dispatch counters
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/settings",
            get(get_own_settings_handler).put(update_settings_handler),
        )
        .route("/settings/:user_id", get(get_settings_handler))
        .route("/reviews", post(analyze_review_handler))
        .route("/profiles", post(create_profile_handler));

    Router::new()
        .nest("/api/v1", api)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
