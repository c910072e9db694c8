//! DeleteSwapHandler - Command handler for deleting a swap request.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{SwapRequestId, UserId};
use crate::domain::swap::SwapError;
use crate::ports::SwapRequestRepository;

/// Command to delete a swap request the caller participates in.
#[derive(Debug, Clone)]
pub struct DeleteSwapCommand {
    pub id: SwapRequestId,
    pub caller: UserId,
}

/// Handler for deleting swap requests.
pub struct DeleteSwapHandler {
    swaps: Arc<dyn SwapRequestRepository>,
}

impl DeleteSwapHandler {
    pub fn new(swaps: Arc<dyn SwapRequestRepository>) -> Self {
        Self { swaps }
    }

    pub async fn handle(&self, cmd: DeleteSwapCommand) -> Result<(), SwapError> {
        let deleted = self.swaps.delete_visible(&cmd.id, &cmd.caller).await?;
        if !deleted {
            return Err(SwapError::NotFound(cmd.id));
        }
        info!(swap_id = %cmd.id, caller = %cmd.caller, "Swap request deleted");
        Ok(())
    }
}
