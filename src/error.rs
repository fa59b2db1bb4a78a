//! Error types for the gateway
//!
//! One enum per failure class. Cache failures never leave the core; downstream
//! and publish failures are the only ones a caller ever sees.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error ==
/// Failure talking to the settings cache. Always non-fatal to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache connection failed: {0}")]
    ConnectionFailed(String),

    #[error("cache operation failed: {0}")]
    OperationFailed(String),

    #[error("cache serialization error: {0}")]
    Serialization(String),
}

// == Downstream Error ==
/// Failure calling the profile service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownstreamError {
    /// Transport failure or timeout; the service could not be reached
    #[error("profile service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a non-success status
    #[error("profile service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The service answered with a body that could not be decoded
    #[error("invalid response from profile service: {0}")]
    InvalidResponse(String),
}

// == Publish Error ==
/// Failure handing a review event to the bus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("failed to encode event: {0}")]
    Serialization(String),

    #[error("event bus send failed: {0}")]
    SendFailed(String),
}

// == Service Error ==
/// The two user-visible failure classes of the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Downstream(#[from] DownstreamError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl ServiceError {
    /// Short machine-readable class name.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Downstream(_) => "downstream",
            ServiceError::Publish(_) => "publish",
        }
    }
}

// == Api Error ==
/// Error surfaced by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request, including a missing user id
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "validation"),
            ApiError::Service(err) => (service_status(err), err.kind()),
        };

        let body = Json(ErrorResponse::new(kind, self.to_string()));
        (status, body).into_response()
    }
}

fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Downstream(DownstreamError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Downstream(DownstreamError::Status { status, .. }) => {
            match StatusCode::from_u16(*status) {
                Ok(code) if code.is_client_error() => code,
                _ => StatusCode::BAD_GATEWAY,
            }
        }
        ServiceError::Downstream(DownstreamError::InvalidResponse(_)) => StatusCode::BAD_GATEWAY,
        ServiceError::Publish(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

// == Result Type Alias ==
/// Convenience Result type for core operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_downstream_status_mapping() {
        let unavailable = ServiceError::from(DownstreamError::Unavailable("refused".into()));
        assert_eq!(status_of(unavailable.into()), StatusCode::SERVICE_UNAVAILABLE);

        let not_found = ServiceError::from(DownstreamError::Status {
            status: 404,
            message: "no such user".into(),
        });
        assert_eq!(status_of(not_found.into()), StatusCode::NOT_FOUND);

        let upstream_crash = ServiceError::from(DownstreamError::Status {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(status_of(upstream_crash.into()), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_publish_and_validation_mapping() {
        let publish = ServiceError::from(PublishError::SendFailed("broker down".into()));
        assert_eq!(publish.kind(), "publish");
        assert_eq!(status_of(publish.into()), StatusCode::SERVICE_UNAVAILABLE);

        let invalid = ApiError::InvalidRequest("user_id is required".into());
        assert_eq!(status_of(invalid), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_service_error_display_is_transparent() {
        let err = ServiceError::from(DownstreamError::Unavailable("timeout".into()));
        assert_eq!(err.to_string(), "profile service unavailable: timeout");
    }
}
