//! TransitionSwapHandler - Command handler for lifecycle transitions.
//!
//! One handler covers accept, reject, complete and cancel: the per-action
//! rules (permitted statuses, required role, target status) live on
//! `SwapAction`, and the repository applies them as a single atomic
//! compare-and-swap. A predicate miss is reported to the caller as
//! `NotFound` regardless of the underlying cause.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{SwapRequestId, UserId};
use crate::domain::swap::{SwapAction, SwapError, SwapRequest};
use crate::ports::SwapRequestRepository;

/// Command to apply a lifecycle action to a swap request.
#[derive(Debug, Clone)]
pub struct TransitionSwapCommand {
    pub id: SwapRequestId,
    pub caller: UserId,
    pub action: SwapAction,
}

/// Handler for swap lifecycle transitions.
pub struct TransitionSwapHandler {
    swaps: Arc<dyn SwapRequestRepository>,
}

impl TransitionSwapHandler {
    pub fn new(swaps: Arc<dyn SwapRequestRepository>) -> Self {
        Self { swaps }
    }

    pub async fn handle(&self, cmd: TransitionSwapCommand) -> Result<SwapRequest, SwapError> {
        let updated = self
            .swaps
            .transition(&cmd.id, &cmd.caller, cmd.action)
            .await?;

        match updated {
            Some(swap) => {
                info!(
                    swap_id = %swap.id(),
                    caller = %cmd.caller,
                    action = ?cmd.action,
                    status = %swap.status(),
                    "Swap request {}",
                    cmd.action.past_tense()
                );
                Ok(swap)
            }
            None => {
                self.log_miss(&cmd).await;
                Err(SwapError::not_found(cmd.id))
            }
        }
    }

    /// Re-reads the record to log the real cause of a predicate miss.
    /// Diagnostic only; the caller always sees `NotFound`.
    async fn log_miss(&self, cmd: &TransitionSwapCommand) {
        match self.swaps.find_by_id(&cmd.id).await {
            Ok(Some(swap)) => match swap.role_of(&cmd.caller) {
                Some(role) if !cmd.action.actor_rule().permits(role) => debug!(
                    swap_id = %cmd.id,
                    caller = %cmd.caller,
                    action = ?cmd.action,
                    ?role,
                    "Transition rejected: caller role not permitted"
                ),
                Some(_) => debug!(
                    swap_id = %cmd.id,
                    caller = %cmd.caller,
                    action = ?cmd.action,
                    status = %swap.status(),
                    "Transition rejected: status does not permit action"
                ),
                None => debug!(
                    swap_id = %cmd.id,
                    caller = %cmd.caller,
                    action = ?cmd.action,
                    "Transition rejected: caller is not a participant"
                ),
            },
            Ok(None) => debug!(
                swap_id = %cmd.id,
                caller = %cmd.caller,
                action = ?cmd.action,
                "Transition rejected: swap request does not exist"
            ),
            Err(err) => debug!(
                swap_id = %cmd.id,
                error = %err,
                "Transition miss diagnostics unavailable"
            ),
        }
    }
}
