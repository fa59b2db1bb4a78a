//! Domain models and DTOs
//!
//! Settings snapshots, review payloads, and the request/response types used
//! by the core operations and the HTTP surface.

pub mod outcome;
pub mod requests;
pub mod responses;
pub mod settings;

// Re-export commonly used types
pub use outcome::{is_missing_user_id, Outcome};
pub use requests::{
    AnalyzeReviewRequest, CreateUserProfileRequest, GetSettingsRequest, UpdateSettingsRequest,
};
pub use responses::{
    AnalyzeReviewResponse, ErrorResponse, HealthResponse, ReviewStatus, StatsResponse,
};
pub use settings::{Profile, ReviewPayload, Settings};
