//! SwapRating entity.
//!
//! A rating is written once when a rater scores the other participant of a
//! completed swap, and never changes afterwards. At most one rating exists
//! per (swap request, rater) pair; that uniqueness is enforced by the
//! repository.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, RatingId, RatingValue, SwapRequestId, Timestamp, UserId,
};

/// A rating given by one swap participant to the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRating {
    id: RatingId,
    swap_request_id: SwapRequestId,
    rater: UserId,
    rated_user: UserId,
    value: RatingValue,
    comment: Option<String>,
    created_at: Timestamp,
}

impl SwapRating {
    /// Create a new rating.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if rater and rated user are the same
    pub fn new(
        id: RatingId,
        swap_request_id: SwapRequestId,
        rater: UserId,
        rated_user: UserId,
        value: RatingValue,
        comment: Option<String>,
    ) -> Result<Self, DomainError> {
        if rater == rated_user {
            return Err(DomainError::validation(
                "rated_user",
                "Cannot rate yourself",
            ));
        }
        Ok(Self {
            id,
            swap_request_id,
            rater,
            rated_user,
            value,
            comment: comment.filter(|c| !c.is_empty()),
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a rating from persistence (no validation).
    pub fn reconstitute(
        id: RatingId,
        swap_request_id: SwapRequestId,
        rater: UserId,
        rated_user: UserId,
        value: RatingValue,
        comment: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            swap_request_id,
            rater,
            rated_user,
            value,
            comment,
            created_at,
        }
    }

    pub fn id(&self) -> &RatingId {
        &self.id
    }

    pub fn swap_request_id(&self) -> &SwapRequestId {
        &self.swap_request_id
    }

    pub fn rater(&self) -> &UserId {
        &self.rater
    }

    pub fn rated_user(&self) -> &UserId {
        &self.rated_user
    }

    pub fn value(&self) -> RatingValue {
        self.value
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
