//! HTTP routes for rating endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_rating, list_ratings, submit_rating, RatingHandlers};

/// Creates the rating router.
///
/// Merged into the swap router, so the full paths are
/// `/api/swaps/ratings` and `/api/swaps/ratings/:id`.
pub fn rating_routes(handlers: RatingHandlers) -> Router {
    Router::new()
        .route("/ratings", post(submit_rating).get(list_ratings))
        .route("/ratings/:id", get(get_rating))
        .with_state(handlers)
}
