//! ListRatingsHandler - Query handler for the caller's authored ratings.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::rating::{RatingError, SwapRating};
use crate::ports::SwapRatingRepository;

/// Handler for listing ratings authored by the caller.
pub struct ListRatingsHandler {
    ratings: Arc<dyn SwapRatingRepository>,
}

impl ListRatingsHandler {
    pub fn new(ratings: Arc<dyn SwapRatingRepository>) -> Self {
        Self { ratings }
    }

    /// Newest first.
    pub async fn handle(&self, caller: &UserId) -> Result<Vec<SwapRating>, RatingError> {
        Ok(self.ratings.list_by_rater(caller).await?)
    }
}
