//! UpdateSwapHandler - Command handler for editing a pending swap's message.
//!
//! Only the free-text message is editable, only by the requester, and only
//! while the request is pending. Status never changes through this path;
//! lifecycle actions have their own endpoints. An edit the caller is not
//! entitled to make collapses to `NotFound`, like a failed transition.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{ErrorCode, SwapRequestId, UserId};
use crate::domain::swap::{SwapError, SwapRequest};
use crate::ports::SwapRequestRepository;

/// Command to update the message on a pending swap request.
#[derive(Debug, Clone)]
pub struct UpdateSwapCommand {
    pub id: SwapRequestId,
    pub caller: UserId,
    pub message: Option<String>,
}

/// Handler for editing swap requests.
pub struct UpdateSwapHandler {
    swaps: Arc<dyn SwapRequestRepository>,
}

impl UpdateSwapHandler {
    pub fn new(swaps: Arc<dyn SwapRequestRepository>) -> Self {
        Self { swaps }
    }

    pub async fn handle(&self, cmd: UpdateSwapCommand) -> Result<SwapRequest, SwapError> {
        let mut swap = self
            .swaps
            .find_visible(&cmd.id, &cmd.caller)
            .await?
            .ok_or(SwapError::NotFound(cmd.id))?;

        if let Err(err) = swap.update_message(&cmd.caller, cmd.message) {
            return match err.code {
                ErrorCode::Forbidden | ErrorCode::InvalidStateTransition => {
                    debug!(swap_id = %cmd.id, caller = %cmd.caller, cause = %err, "Edit rejected");
                    Err(SwapError::NotFound(cmd.id))
                }
                _ => Err(err.into()),
            };
        }

        self.swaps.update(&swap).await?;
        Ok(swap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySwapRequestRepository;
    use crate::domain::swap::SwapAction;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seeded() -> (UpdateSwapHandler, Arc<InMemorySwapRequestRepository>, SwapRequestId) {
        let swaps = Arc::new(InMemorySwapRequestRepository::new());
        let swap = SwapRequest::new(
            SwapRequestId::new(),
            user("alice"),
            user("bob"),
            "Yoga".to_string(),
            "Guitar".to_string(),
            Some("original".to_string()),
        )
        .unwrap();
        let id = *swap.id();
        swaps.save(&swap).await.unwrap();
        (UpdateSwapHandler::new(swaps.clone()), swaps, id)
    }

    #[tokio::test]
    async fn requester_edits_pending_message() {
        let (handler, swaps, id) = seeded().await;

        let swap = handler
            .handle(UpdateSwapCommand {
                id,
                caller: user("alice"),
                message: Some("updated".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(swap.message(), Some("updated"));

        let stored = swaps.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.message(), Some("updated"));
    }

    #[tokio::test]
    async fn recipient_cannot_edit() {
        let (handler, _, id) = seeded().await;

        let err = handler
            .handle(UpdateSwapCommand {
                id,
                caller: user("bob"),
                message: Some("hijacked".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err, SwapError::NotFound(id));
    }

    #[tokio::test]
    async fn accepted_swap_is_not_editable() {
        let (handler, swaps, id) = seeded().await;
        swaps
            .transition(&id, &user("bob"), SwapAction::Accept)
            .await
            .unwrap();

        let err = handler
            .handle(UpdateSwapCommand {
                id,
                caller: user("alice"),
                message: Some("too late".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err, SwapError::NotFound(id));
    }
}
