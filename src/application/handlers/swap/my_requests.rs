//! MyRequestsHandler - Query handler for the sent/received split view.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::swap::{SwapError, SwapRequest};
use crate::ports::SwapRequestRepository;

/// The caller's swap requests, split by direction.
///
/// The two lists are disjoint: a request appears in exactly one of them.
#[derive(Debug, Clone)]
pub struct MySwapRequests {
    pub sent: Vec<SwapRequest>,
    pub received: Vec<SwapRequest>,
}

/// Handler for the "my requests" view.
pub struct MyRequestsHandler {
    swaps: Arc<dyn SwapRequestRepository>,
}

impl MyRequestsHandler {
    pub fn new(swaps: Arc<dyn SwapRequestRepository>) -> Self {
        Self { swaps }
    }

    pub async fn handle(&self, caller: &UserId) -> Result<MySwapRequests, SwapError> {
        let sent = self.swaps.list_sent(caller).await?;
        let received = self.swaps.list_received(caller).await?;
        Ok(MySwapRequests { sent, received })
    }
}
