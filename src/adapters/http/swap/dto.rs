//! HTTP DTOs for swap endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::swap::MySwapRequests;
use crate::domain::foundation::SwapStatus;
use crate::domain::swap::SwapRequest;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to propose a swap.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSwapRequest {
    pub recipient: String,
    pub requested_skill: String,
    pub offered_skill: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request to edit the message on a pending swap.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSwapRequest {
    #[serde(default)]
    pub message: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full swap request view.
#[derive(Debug, Clone, Serialize)]
pub struct SwapResponse {
    pub id: String,
    pub requester: String,
    pub recipient: String,
    pub requested_skill: String,
    pub offered_skill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: SwapStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SwapRequest> for SwapResponse {
    fn from(swap: SwapRequest) -> Self {
        Self {
            id: swap.id().to_string(),
            requester: swap.requester().to_string(),
            recipient: swap.recipient().to_string(),
            requested_skill: swap.requested_skill().to_string(),
            offered_skill: swap.offered_skill().to_string(),
            message: swap.message().map(String::from),
            status: swap.status(),
            created_at: swap.created_at().as_datetime().to_rfc3339(),
            updated_at: swap.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Response for swap command operations.
#[derive(Debug, Clone, Serialize)]
pub struct SwapCommandResponse {
    pub message: String,
    pub swap_request: SwapResponse,
}

/// List of swap requests.
#[derive(Debug, Clone, Serialize)]
pub struct SwapListResponse {
    pub items: Vec<SwapResponse>,
    pub total: usize,
}

impl SwapListResponse {
    pub fn new(swaps: Vec<SwapRequest>) -> Self {
        let items: Vec<SwapResponse> = swaps.into_iter().map(Into::into).collect();
        let total = items.len();
        Self { items, total }
    }
}

/// The caller's requests, split by direction.
#[derive(Debug, Clone, Serialize)]
pub struct MyRequestsResponse {
    pub sent_requests: Vec<SwapResponse>,
    pub received_requests: Vec<SwapResponse>,
}

impl From<MySwapRequests> for MyRequestsResponse {
    fn from(mine: MySwapRequests) -> Self {
        Self {
            sent_requests: mine.sent.into_iter().map(Into::into).collect(),
            received_requests: mine.received.into_iter().map(Into::into).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
