//! GetSwapHandler - Query handler for a single caller-visible swap.

use std::sync::Arc;

use crate::domain::foundation::{SwapRequestId, UserId};
use crate::domain::swap::{SwapError, SwapRequest};
use crate::ports::SwapRequestRepository;

/// Query for one swap request by id.
#[derive(Debug, Clone)]
pub struct GetSwapQuery {
    pub id: SwapRequestId,
    pub caller: UserId,
}

/// Handler for fetching a single swap request.
pub struct GetSwapHandler {
    swaps: Arc<dyn SwapRequestRepository>,
}

impl GetSwapHandler {
    pub fn new(swaps: Arc<dyn SwapRequestRepository>) -> Self {
        Self { swaps }
    }

    pub async fn handle(&self, query: GetSwapQuery) -> Result<SwapRequest, SwapError> {
        self.swaps
            .find_visible(&query.id, &query.caller)
            .await?
            .ok_or(SwapError::NotFound(query.id))
    }
}
