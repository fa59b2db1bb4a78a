//! Settings wire encoding for the cache.
//!
//! JSON document with camelCase field tags. Unknown fields are ignored and
//! missing ones take their defaults, so older and newer gateways can share a
//! cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::models::Settings;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SettingsDocument {
    theme: String,
    picked_model: String,
    font: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Serializes settings to cache bytes.
pub fn encode_settings(settings: &Settings) -> Result<Vec<u8>, CacheError> {
    let doc = SettingsDocument {
        theme: settings.theme.clone(),
        picked_model: settings.picked_model.clone(),
        font: settings.font.clone(),
        updated_at: settings.updated_at,
    };
    serde_json::to_vec(&doc).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes cache bytes to settings.
pub fn decode_settings(bytes: &[u8]) -> Result<Settings, CacheError> {
    let doc: SettingsDocument =
        serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))?;
    Ok(Settings {
        theme: doc.theme,
        picked_model: doc.picked_model,
        font: doc.font,
        updated_at: doc.updated_at,
    })
}
