//! Explicit result for operations that require a user id.

/// Result of a settings operation that passed transport decoding.
///
/// `MissingUserId` is a validation outcome rather than an error: nothing was
/// read or written, and it must not be confused with "no settings exist".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation ran and produced a value
    Completed(T),
    /// The request carried an empty user id; no cache or downstream call was made
    MissingUserId,
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    /// Returns the completed value, if any.
    pub fn into_completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::MissingUserId => None,
        }
    }
}

/// Returns true if the request carried no user id.
///
/// Only the empty string counts; any other value, whitespace included, is a
/// key the cache and profile service are asked about.
pub fn is_missing_user_id(user_id: &str) -> bool {
    user_id.is_empty()
}
