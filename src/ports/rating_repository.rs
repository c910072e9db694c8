//! Swap rating repository port.
//!
//! Ratings are write-once. Uniqueness on (swap request, rater) is enforced
//! here: a duplicate insert fails with `DuplicateRating` and must leave no
//! trace, so a duplicate submission can never reach the aggregate update.

use crate::domain::foundation::{DomainError, RatingId, UserId};
use crate::domain::rating::SwapRating;
use async_trait::async_trait;

/// Repository port for swap rating persistence.
#[async_trait]
pub trait SwapRatingRepository: Send + Sync {
    /// Insert a new rating.
    ///
    /// # Errors
    ///
    /// - `DuplicateRating` if a rating by this rater for this swap exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, rating: &SwapRating) -> Result<(), DomainError>;

    /// Rater-scoped lookup: `Some` only if the caller authored the rating.
    async fn find_for_rater(
        &self,
        id: &RatingId,
        rater: &UserId,
    ) -> Result<Option<SwapRating>, DomainError>;

    /// Ratings authored by the caller, newest first.
    async fn list_by_rater(&self, rater: &UserId) -> Result<Vec<SwapRating>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn swap_rating_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SwapRatingRepository) {}
    }
}
