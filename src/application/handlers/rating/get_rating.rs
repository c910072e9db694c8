//! GetRatingHandler - Query handler for a single rating authored by the caller.

use std::sync::Arc;

use crate::domain::foundation::{RatingId, UserId};
use crate::domain::rating::{RatingError, SwapRating};
use crate::ports::SwapRatingRepository;

/// Query for one rating by id.
#[derive(Debug, Clone)]
pub struct GetRatingQuery {
    pub id: RatingId,
    pub caller: UserId,
}

/// Handler for fetching a single rating.
pub struct GetRatingHandler {
    ratings: Arc<dyn SwapRatingRepository>,
}

impl GetRatingHandler {
    pub fn new(ratings: Arc<dyn SwapRatingRepository>) -> Self {
        Self { ratings }
    }

    pub async fn handle(&self, query: GetRatingQuery) -> Result<SwapRating, RatingError> {
        self.ratings
            .find_for_rater(&query.id, &query.caller)
            .await?
            .ok_or(RatingError::NotFound(query.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySwapRatingRepository;
    use crate::domain::foundation::{RatingValue, SwapRequestId};
    use crate::domain::rating::SwapRating;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seeded() -> (GetRatingHandler, RatingId) {
        let ratings = Arc::new(InMemorySwapRatingRepository::new());
        let rating = SwapRating::new(
            RatingId::new(),
            SwapRequestId::new(),
            user("bob"),
            user("alice"),
            RatingValue::try_from_i16(4).unwrap(),
            Some("Great teacher".to_string()),
        )
        .unwrap();
        let id = *rating.id();
        ratings.save(&rating).await.unwrap();
        (GetRatingHandler::new(ratings), id)
    }

    #[tokio::test]
    async fn author_fetches_own_rating() {
        let (handler, id) = seeded().await;

        let rating = handler
            .handle(GetRatingQuery {
                id,
                caller: user("bob"),
            })
            .await
            .unwrap();
        assert_eq!(rating.comment(), Some("Great teacher"));
    }

    #[tokio::test]
    async fn rated_user_cannot_fetch_it() {
        let (handler, id) = seeded().await;

        let err = handler
            .handle(GetRatingQuery {
                id,
                caller: user("alice"),
            })
            .await
            .unwrap_err();
        assert_eq!(err, RatingError::NotFound(id));
    }
}
