//! Settings Gateway
//!
//! Cache-aside layer for user settings in front of the profile service, and
//! a fire-and-forget dispatcher turning review-analysis requests into events.

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod downstream;
pub mod error;
pub mod events;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use app::{App, Backends};
pub use config::Config;
pub use service::{ReviewDispatcher, SettingsService};
