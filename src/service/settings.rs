//! Settings Cache Service
//!
//! Cache-aside reads and invalidate-on-write updates in front of the profile
//! service.
//!
//! Reads check the cache first. On a miss (or a failed cache read) the profile
//! service is called once and the result is handed to the population queue;
//! the caller gets the fresh value without waiting for the cache write.
//! Writes go to the profile service and then delete the cached entry; the
//! next read repopulates it.
//!
//! No coalescing: concurrent misses for one user each call the profile
//! service, and a population write that lands after a concurrent update's
//! invalidation leaves the older snapshot cached until its TTL runs out.

use std::sync::Arc;

use crate::cache::SettingsCache;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::downstream::DownstreamClient;
use crate::error::Result;
use crate::models::{
    is_missing_user_id, CreateUserProfileRequest, GetSettingsRequest, Outcome, Profile, Settings,
    UpdateSettingsRequest,
};
use crate::tasks::PopulateQueue;

/// Owns the cache-aside algorithm for settings.
pub struct SettingsService {
    cache: Arc<dyn SettingsCache>,
    downstream: Arc<dyn DownstreamClient>,
    populate: PopulateQueue,
    diagnostics: Diagnostics,
}

impl SettingsService {
    pub fn new(
        cache: Arc<dyn SettingsCache>,
        downstream: Arc<dyn DownstreamClient>,
        populate: PopulateQueue,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            cache,
            downstream,
            populate,
            diagnostics,
        }
    }

    // == Get Settings ==
    /// Returns the user's settings, from cache when possible.
    ///
    /// # Errors
    /// Only a profile service failure is returned. Cache faults are reported
    /// as diagnostics and handled as misses.
    pub async fn get_settings(&self, req: &GetSettingsRequest) -> Result<Outcome<Settings>> {
        if is_missing_user_id(&req.user_id) {
            return Ok(Outcome::MissingUserId);
        }
        let user_id = req.user_id.as_str();

        match self.cache.get(user_id).await {
            Ok(Some(settings)) => {
                self.diagnostics.emit(Diagnostic::CacheHit {
                    user_id: user_id.to_string(),
                });
                return Ok(Outcome::Completed(settings));
            }
            Ok(None) => self.diagnostics.emit(Diagnostic::CacheMiss {
                user_id: user_id.to_string(),
            }),
            Err(error) => self.diagnostics.emit(Diagnostic::CacheReadFailed {
                user_id: user_id.to_string(),
                error,
            }),
        }

        let settings = self.downstream.get_settings(req).await?;
        self.populate.submit(user_id, settings.clone());

        Ok(Outcome::Completed(settings))
    }

    // == Update Settings ==
    /// Writes settings through the profile service, then drops the cached copy.
    ///
    /// # Errors
    /// A profile service failure is returned and the cache is left untouched.
    /// An invalidation failure is only reported as a diagnostic.
    pub async fn update_settings(&self, req: &UpdateSettingsRequest) -> Result<Outcome<Settings>> {
        if is_missing_user_id(&req.user_id) {
            return Ok(Outcome::MissingUserId);
        }
        let user_id = req.user_id.as_str();

        let settings = self.downstream.update_settings(req).await?;

        match self.cache.invalidate(user_id).await {
            Ok(()) => self.diagnostics.emit(Diagnostic::CacheInvalidated {
                user_id: user_id.to_string(),
            }),
            Err(error) => self.diagnostics.emit(Diagnostic::CacheInvalidateFailed {
                user_id: user_id.to_string(),
                error,
            }),
        }

        Ok(Outcome::Completed(settings))
    }

    // == Create Profile ==
    /// Forwards profile creation to the profile service. Nothing is cached.
    pub async fn create_user_profile(&self, req: &CreateUserProfileRequest) -> Result<Profile> {
        Ok(self.downstream.create_user_profile(req).await?)
    }
}
