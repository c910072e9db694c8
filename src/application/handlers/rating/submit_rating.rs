//! SubmitRatingHandler - Command handler for rating a completed swap.
//!
//! Validation order matters for what the caller can learn:
//!
//! 1. value in range (400)
//! 2. swap visible to the rater (else 404 - existence is never revealed
//!    to outsiders)
//! 3. swap completed (400)
//! 4. rated user is the other participant (400)
//! 5. insert - the unique key on (swap, rater) makes concurrent duplicate
//!    submissions lose here, before any aggregate write
//! 6. aggregate increment on the rated user
//!
//! Step 6 runs after the insert committed. If it fails the rating exists
//! but the aggregate is stale; this is logged at error level for repair
//! rather than wrapped in a cross-store transaction.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::foundation::{
    ErrorCode, RatingId, RatingValue, SwapRequestId, SwapStatus, UserId,
};
use crate::domain::rating::{RatingAggregate, RatingError, SwapRating};
use crate::ports::{SwapRatingRepository, SwapRequestRepository, UserDirectory};

/// Command to submit a rating for a completed swap.
#[derive(Debug, Clone)]
pub struct SubmitRatingCommand {
    pub swap_request_id: SwapRequestId,
    pub rater: UserId,
    pub rated_user: UserId,
    pub value: i16,
    pub comment: Option<String>,
}

/// Result of a successful rating submission.
#[derive(Debug, Clone)]
pub struct SubmitRatingResult {
    pub rating: SwapRating,
    /// The rated user's aggregate after this rating was applied.
    pub aggregate: RatingAggregate,
}

/// Handler for submitting swap ratings.
pub struct SubmitRatingHandler {
    ratings: Arc<dyn SwapRatingRepository>,
    swaps: Arc<dyn SwapRequestRepository>,
    users: Arc<dyn UserDirectory>,
}

impl SubmitRatingHandler {
    pub fn new(
        ratings: Arc<dyn SwapRatingRepository>,
        swaps: Arc<dyn SwapRequestRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            ratings,
            swaps,
            users,
        }
    }

    pub async fn handle(&self, cmd: SubmitRatingCommand) -> Result<SubmitRatingResult, RatingError> {
        let value = RatingValue::try_from_i16(cmd.value)
            .map_err(crate::domain::foundation::DomainError::from)?;

        let swap = self
            .swaps
            .find_visible(&cmd.swap_request_id, &cmd.rater)
            .await?
            .ok_or(RatingError::SwapNotFound(cmd.swap_request_id))?;

        if swap.status() != SwapStatus::Completed {
            return Err(RatingError::SwapNotCompleted(cmd.swap_request_id));
        }

        // The rater is a participant (find_visible proved it), so the only
        // valid rated user is the counterpart.
        let counterpart = swap
            .other_participant(&cmd.rater)
            .ok_or(RatingError::SwapNotFound(cmd.swap_request_id))?;
        if counterpart != &cmd.rated_user {
            return Err(RatingError::validation(
                "rated_user",
                "Rated user must be the other participant of the swap",
            ));
        }

        let rating = SwapRating::new(
            RatingId::new(),
            cmd.swap_request_id,
            cmd.rater.clone(),
            cmd.rated_user.clone(),
            value,
            cmd.comment,
        )?;

        if let Err(err) = self.ratings.save(&rating).await {
            return Err(match err.code {
                ErrorCode::DuplicateRating => RatingError::Duplicate(cmd.swap_request_id),
                _ => err.into(),
            });
        }

        let aggregate = match self.users.record_rating(&cmd.rated_user, value).await {
            Ok(aggregate) => aggregate,
            Err(err) => {
                error!(
                    rating_id = %rating.id(),
                    rated_user = %cmd.rated_user,
                    error = %err,
                    "Rating stored but aggregate update failed"
                );
                return Err(err.into());
            }
        };

        info!(
            rating_id = %rating.id(),
            swap_id = %cmd.swap_request_id,
            rater = %cmd.rater,
            rated_user = %cmd.rated_user,
            value = value.value(),
            mean = aggregate.mean(),
            count = aggregate.count(),
            "Rating submitted"
        );

        Ok(SubmitRatingResult { rating, aggregate })
    }
}
