//! HTTP handlers for rating endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::swap::dto::ErrorResponse;
use crate::application::handlers::rating::{
    GetRatingHandler, GetRatingQuery, ListRatingsHandler, SubmitRatingCommand, SubmitRatingHandler,
};
use crate::domain::foundation::{RatingId, UserId};
use crate::domain::rating::RatingError;

use super::dto::{RatingCommandResponse, RatingListResponse, RatingResponse, SubmitRatingRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RatingHandlers {
    submit_handler: Arc<SubmitRatingHandler>,
    get_handler: Arc<GetRatingHandler>,
    list_handler: Arc<ListRatingsHandler>,
}

impl RatingHandlers {
    pub fn new(
        submit_handler: Arc<SubmitRatingHandler>,
        get_handler: Arc<GetRatingHandler>,
        list_handler: Arc<ListRatingsHandler>,
    ) -> Self {
        Self {
            submit_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/swaps/ratings - Rate a completed swap
pub async fn submit_rating(
    State(handlers): State<RatingHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SubmitRatingRequest>,
) -> Response {
    let swap_request_id = match req.swap_request.parse() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid swap request ID")),
            )
                .into_response()
        }
    };
    let rated_user = match UserId::new(req.rated_user) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid rated user")),
            )
                .into_response()
        }
    };

    let cmd = SubmitRatingCommand {
        swap_request_id,
        rater: user.id,
        rated_user,
        value: req.rating,
        comment: req.comment,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response: RatingCommandResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_rating_error(e),
    }
}

/// GET /api/swaps/ratings - Ratings authored by the caller
pub async fn list_ratings(
    State(handlers): State<RatingHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list_handler.handle(&user.id).await {
        Ok(ratings) => (StatusCode::OK, Json(RatingListResponse::new(ratings))).into_response(),
        Err(e) => handle_rating_error(e),
    }
}

/// GET /api/swaps/ratings/:id - One rating authored by the caller
pub async fn get_rating(
    State(handlers): State<RatingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let id: RatingId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid rating ID")),
            )
                .into_response()
        }
    };

    let query = GetRatingQuery {
        id,
        caller: user.id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(rating) => {
            let response: RatingResponse = rating.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_rating_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_rating_error(error: RatingError) -> Response {
    match error {
        RatingError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Rating", &id.to_string())),
        )
            .into_response(),
        RatingError::SwapNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Swap request", &id.to_string())),
        )
            .into_response(),
        RatingError::SwapNotCompleted(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Only completed swaps can be rated",
            )),
        )
            .into_response(),
        RatingError::Duplicate(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::conflict(
                "You have already rated this swap",
            )),
        )
            .into_response(),
        RatingError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        RatingError::Infrastructure(msg) => {
            tracing::error!("Rating request failed: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal error")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SwapRequestId;

    #[test]
    fn rating_not_found_maps_to_404() {
        let response = handle_rating_error(RatingError::NotFound(RatingId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn swap_not_found_maps_to_404() {
        let response = handle_rating_error(RatingError::SwapNotFound(SwapRequestId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_maps_to_400_with_conflict_code() {
        let response = handle_rating_error(RatingError::Duplicate(SwapRequestId::new()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn swap_not_completed_maps_to_400() {
        let response = handle_rating_error(RatingError::SwapNotCompleted(SwapRequestId::new()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
