//! User directory port.
//!
//! The user directory is owned by the accounts service; this port covers the
//! slice this service consumes: profile lookup, filtered browsing, and the
//! single aggregate write triggered by a new rating.

use crate::domain::foundation::{DomainError, RatingValue, Timestamp, UserId};
use crate::domain::rating::RatingAggregate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Directory port for user profiles and the rating aggregate.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Get a user profile by id.
    ///
    /// Returns `None` if not found.
    async fn get_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// List profiles matching the filter, newest first.
    ///
    /// The `exclude` user (the caller) is always omitted.
    async fn list(
        &self,
        filter: &UserFilter,
        exclude: &UserId,
    ) -> Result<Vec<UserProfile>, DomainError>;

    /// Apply one rating to the user's aggregate and return the new state.
    ///
    /// Implementations must make the increment atomic with respect to
    /// concurrent raters of the same user; the sum+count representation
    /// makes a single-statement commutative update sufficient.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    /// - `DatabaseError` on persistence failure
    async fn record_rating(
        &self,
        id: &UserId,
        value: RatingValue,
    ) -> Result<RatingAggregate, DomainError>;
}

/// Browse filter for the user directory.
///
/// All fields are optional substring/flag filters combined with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Case-insensitive substring over name and email.
    pub search: Option<String>,

    /// Case-insensitive substring over offered and wanted skills.
    pub skill: Option<String>,

    /// Case-insensitive substring over location.
    pub location: Option<String>,

    /// Availability flag.
    pub available: Option<bool>,
}

impl UserFilter {
    /// Returns true if no filter criteria are set.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.skill.is_none()
            && self.location.is_none()
            && self.available.is_none()
    }
}

/// Read view of a user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id.
    pub id: UserId,

    /// Email address.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Free-text location.
    pub location: Option<String>,

    /// Free-text bio.
    pub bio: Option<String>,

    /// Skills the user offers.
    pub skills_offered: Vec<String>,

    /// Skills the user wants to learn.
    pub skills_wanted: Vec<String>,

    /// Whether the user is currently open to swaps.
    pub is_available: bool,

    /// Running rating aggregate.
    pub rating: RatingAggregate,

    /// When the profile was created.
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn user_directory_is_object_safe() {
        fn _accepts_dyn(_dir: &dyn UserDirectory) {}
    }

    #[test]
    fn default_filter_is_empty() {
        assert!(UserFilter::default().is_empty());
    }

    #[test]
    fn filter_with_any_criterion_is_not_empty() {
        let filter = UserFilter {
            skill: Some("guitar".to_string()),
            ..UserFilter::default()
        };
        assert!(!filter.is_empty());
    }
}
