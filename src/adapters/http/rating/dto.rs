//! HTTP DTOs for rating endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::rating::SubmitRatingResult;
use crate::domain::rating::SwapRating;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to rate a completed swap.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRatingRequest {
    pub swap_request: String,
    pub rated_user: String,
    pub rating: i16,
    #[serde(default)]
    pub comment: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full rating view.
#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub id: String,
    pub swap_request: String,
    pub rater: String,
    pub rated_user: String,
    pub rating: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<SwapRating> for RatingResponse {
    fn from(rating: SwapRating) -> Self {
        Self {
            id: rating.id().to_string(),
            swap_request: rating.swap_request_id().to_string(),
            rater: rating.rater().to_string(),
            rated_user: rating.rated_user().to_string(),
            rating: rating.value().value(),
            comment: rating.comment().map(String::from),
            created_at: rating.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Response for a successful rating submission.
///
/// Carries the rated user's aggregate after the write so clients can
/// refresh the profile card without another round trip.
#[derive(Debug, Clone, Serialize)]
pub struct RatingCommandResponse {
    pub message: String,
    pub rating: RatingResponse,
    pub rated_user_rating: f64,
    pub rated_user_rating_count: i64,
}

impl From<SubmitRatingResult> for RatingCommandResponse {
    fn from(result: SubmitRatingResult) -> Self {
        Self {
            message: "Rating submitted".to_string(),
            rating: result.rating.into(),
            rated_user_rating: result.aggregate.mean(),
            rated_user_rating_count: result.aggregate.count(),
        }
    }
}

/// List of ratings authored by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RatingListResponse {
    pub items: Vec<RatingResponse>,
    pub total: usize,
}

impl RatingListResponse {
    pub fn new(ratings: Vec<SwapRating>) -> Self {
        let items: Vec<RatingResponse> = ratings.into_iter().map(Into::into).collect();
        let total = items.len();
        Self { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{RatingId, RatingValue, SwapRequestId, UserId};
    use crate::domain::rating::RatingAggregate;

    #[test]
    fn submit_rating_request_deserializes() {
        let json = r#"{
            "swap_request": "11111111-2222-3333-4444-555555555555",
            "rated_user": "alice",
            "rating": 4
        }"#;
        let req: SubmitRatingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.rating, 4);
        assert!(req.comment.is_none());
    }

    #[test]
    fn rating_command_response_carries_aggregate() {
        let rating = SwapRating::new(
            RatingId::new(),
            SwapRequestId::new(),
            UserId::new("bob").unwrap(),
            UserId::new("alice").unwrap(),
            RatingValue::try_from_i16(4).unwrap(),
            None,
        )
        .unwrap();
        let result = SubmitRatingResult {
            rating,
            aggregate: RatingAggregate::from_parts(13, 3),
        };

        let response: RatingCommandResponse = result.into();
        assert_eq!(response.rated_user_rating, 4.33);
        assert_eq!(response.rated_user_rating_count, 3);
    }
}
