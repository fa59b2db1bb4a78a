//! Core services: settings cache-aside and review dispatch.

mod review;
mod settings;

pub use review::ReviewDispatcher;
pub use settings::SettingsService;
