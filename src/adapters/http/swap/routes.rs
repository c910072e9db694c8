//! HTTP routes for swap endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    accept_swap, cancel_swap, complete_swap, create_swap, delete_swap, get_swap, list_swaps,
    my_requests, reject_swap, update_swap, SwapHandlers,
};

/// Creates the swap router with all endpoints.
///
/// Mounted under `/api/swaps`. The ratings router is merged alongside at
/// the same mount point.
pub fn swap_routes(handlers: SwapHandlers) -> Router {
    Router::new()
        .route("/", post(create_swap).get(list_swaps))
        .route("/my-requests", get(my_requests))
        .route(
            "/:id",
            get(get_swap).put(update_swap).delete(delete_swap),
        )
        .route("/:id/accept", post(accept_swap))
        .route("/:id/reject", post(reject_swap))
        .route("/:id/complete", post(complete_swap))
        .route("/:id/cancel", post(cancel_swap))
        .with_state(handlers)
}
