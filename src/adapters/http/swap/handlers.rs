//! HTTP handlers for swap endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::swap::{
    CreateSwapCommand, CreateSwapHandler, DeleteSwapCommand, DeleteSwapHandler, GetSwapHandler,
    GetSwapQuery, ListSwapsHandler, MyRequestsHandler, TransitionSwapCommand,
    TransitionSwapHandler, UpdateSwapCommand, UpdateSwapHandler,
};
use crate::domain::foundation::{SwapRequestId, UserId};
use crate::domain::swap::{SwapAction, SwapError};

use super::dto::{
    CreateSwapRequest, ErrorResponse, MyRequestsResponse, SwapCommandResponse, SwapListResponse,
    SwapResponse, UpdateSwapRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SwapHandlers {
    create_handler: Arc<CreateSwapHandler>,
    transition_handler: Arc<TransitionSwapHandler>,
    get_handler: Arc<GetSwapHandler>,
    list_handler: Arc<ListSwapsHandler>,
    my_requests_handler: Arc<MyRequestsHandler>,
    update_handler: Arc<UpdateSwapHandler>,
    delete_handler: Arc<DeleteSwapHandler>,
}

impl SwapHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreateSwapHandler>,
        transition_handler: Arc<TransitionSwapHandler>,
        get_handler: Arc<GetSwapHandler>,
        list_handler: Arc<ListSwapsHandler>,
        my_requests_handler: Arc<MyRequestsHandler>,
        update_handler: Arc<UpdateSwapHandler>,
        delete_handler: Arc<DeleteSwapHandler>,
    ) -> Self {
        Self {
            create_handler,
            transition_handler,
            get_handler,
            list_handler,
            my_requests_handler,
            update_handler,
            delete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/swaps - Propose a swap
pub async fn create_swap(
    State(handlers): State<SwapHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateSwapRequest>,
) -> Response {
    let recipient = match UserId::new(req.recipient) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid recipient")),
            )
                .into_response()
        }
    };

    let cmd = CreateSwapCommand {
        requester: user.id,
        recipient,
        requested_skill: req.requested_skill,
        offered_skill: req.offered_skill,
        message: req.message,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(swap) => {
            let response = SwapCommandResponse {
                message: "Swap request created".to_string(),
                swap_request: swap.into(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// GET /api/swaps - All swaps the caller participates in
pub async fn list_swaps(
    State(handlers): State<SwapHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list_handler.handle(&user.id).await {
        Ok(swaps) => (StatusCode::OK, Json(SwapListResponse::new(swaps))).into_response(),
        Err(e) => handle_swap_error(e),
    }
}

/// GET /api/swaps/my-requests - Sent and received, split
pub async fn my_requests(
    State(handlers): State<SwapHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.my_requests_handler.handle(&user.id).await {
        Ok(mine) => {
            let response: MyRequestsResponse = mine.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// GET /api/swaps/:id - One swap request
pub async fn get_swap(
    State(handlers): State<SwapHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_swap_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetSwapQuery {
        id,
        caller: user.id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(swap) => {
            let response: SwapResponse = swap.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// PUT /api/swaps/:id - Edit the message on a pending swap
pub async fn update_swap(
    State(handlers): State<SwapHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateSwapRequest>,
) -> Response {
    let id = match parse_swap_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateSwapCommand {
        id,
        caller: user.id,
        message: req.message,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(swap) => {
            let response = SwapCommandResponse {
                message: "Swap request updated".to_string(),
                swap_request: swap.into(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// DELETE /api/swaps/:id - Delete a swap request
pub async fn delete_swap(
    State(handlers): State<SwapHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_swap_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeleteSwapCommand {
        id,
        caller: user.id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_swap_error(e),
    }
}

/// POST /api/swaps/:id/accept
pub async fn accept_swap(
    state: State<SwapHandlers>,
    auth: RequireAuth,
    id: Path<String>,
) -> Response {
    transition_swap(state, auth, id, SwapAction::Accept).await
}

/// POST /api/swaps/:id/reject
pub async fn reject_swap(
    state: State<SwapHandlers>,
    auth: RequireAuth,
    id: Path<String>,
) -> Response {
    transition_swap(state, auth, id, SwapAction::Reject).await
}

/// POST /api/swaps/:id/complete
pub async fn complete_swap(
    state: State<SwapHandlers>,
    auth: RequireAuth,
    id: Path<String>,
) -> Response {
    transition_swap(state, auth, id, SwapAction::Complete).await
}

/// POST /api/swaps/:id/cancel
pub async fn cancel_swap(
    state: State<SwapHandlers>,
    auth: RequireAuth,
    id: Path<String>,
) -> Response {
    transition_swap(state, auth, id, SwapAction::Cancel).await
}

async fn transition_swap(
    State(handlers): State<SwapHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    action: SwapAction,
) -> Response {
    let id = match parse_swap_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = TransitionSwapCommand {
        id,
        caller: user.id,
        action,
    };

    match handlers.transition_handler.handle(cmd).await {
        Ok(swap) => {
            let response = SwapCommandResponse {
                message: format!("Swap request {}", action.past_tense()),
                swap_request: swap.into(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_swap_id(raw: &str) -> Result<SwapRequestId, Response> {
    raw.parse::<SwapRequestId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid swap request ID")),
        )
            .into_response()
    })
}

fn handle_swap_error(error: SwapError) -> Response {
    match error {
        SwapError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Swap request", &id.to_string())),
        )
            .into_response(),
        SwapError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        SwapError::Infrastructure(msg) => {
            tracing::error!("Swap request failed: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal error")),
            )
                .into_response()
        }
    }
}
