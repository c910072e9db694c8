//! CreateSwapHandler - Command handler for proposing a new swap.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{SwapRequestId, UserId};
use crate::domain::swap::{SwapError, SwapRequest};
use crate::ports::{SwapRequestRepository, UserDirectory};

/// Command to propose a swap to another user.
#[derive(Debug, Clone)]
pub struct CreateSwapCommand {
    pub requester: UserId,
    pub recipient: UserId,
    pub requested_skill: String,
    pub offered_skill: String,
    pub message: Option<String>,
}

/// Handler for creating swap requests.
pub struct CreateSwapHandler {
    swaps: Arc<dyn SwapRequestRepository>,
    users: Arc<dyn UserDirectory>,
}

impl CreateSwapHandler {
    pub fn new(swaps: Arc<dyn SwapRequestRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { swaps, users }
    }

    pub async fn handle(&self, cmd: CreateSwapCommand) -> Result<SwapRequest, SwapError> {
        // 1. The recipient must exist in the directory
        if self.users.get_by_id(&cmd.recipient).await?.is_none() {
            return Err(SwapError::validation(
                "recipient",
                "Recipient user does not exist",
            ));
        }

        // 2. Build the aggregate (validates skills and self-swap)
        let swap = SwapRequest::new(
            SwapRequestId::new(),
            cmd.requester,
            cmd.recipient,
            cmd.requested_skill,
            cmd.offered_skill,
            cmd.message,
        )?;

        // 3. Persist
        self.swaps.save(&swap).await?;

        info!(
            swap_id = %swap.id(),
            requester = %swap.requester(),
            recipient = %swap.recipient(),
            "Swap request created"
        );

        Ok(swap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        test_profile, InMemorySwapRequestRepository, InMemoryUserDirectory,
    };
    use crate::domain::foundation::SwapStatus;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn handler_with_users(ids: &[&str]) -> (CreateSwapHandler, Arc<InMemorySwapRequestRepository>) {
        let swaps = Arc::new(InMemorySwapRequestRepository::new());
        let mut users = InMemoryUserDirectory::new();
        for id in ids {
            users = users.with_profile(test_profile(id));
        }
        (
            CreateSwapHandler::new(swaps.clone(), Arc::new(users)),
            swaps,
        )
    }

    fn command(requester: &str, recipient: &str) -> CreateSwapCommand {
        CreateSwapCommand {
            requester: user(requester),
            recipient: user(recipient),
            requested_skill: "Yoga".to_string(),
            offered_skill: "Guitar".to_string(),
            message: Some("Let's trade lessons".to_string()),
        }
    }

    #[tokio::test]
    async fn creates_pending_swap_with_valid_input() {
        let (handler, swaps) = handler_with_users(&["alice", "bob"]);

        let swap = handler.handle(command("alice", "bob")).await.unwrap();

        assert_eq!(swap.status(), SwapStatus::Pending);
        assert_eq!(swap.requester(), &user("alice"));
        assert_eq!(swap.recipient(), &user("bob"));
        assert_eq!(swap.message(), Some("Let's trade lessons"));
        assert_eq!(swaps.len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_recipient() {
        let (handler, swaps) = handler_with_users(&["alice"]);

        let err = handler.handle(command("alice", "ghost")).await.unwrap_err();

        assert!(matches!(
            err,
            SwapError::ValidationFailed { ref field, .. } if field == "recipient"
        ));
        assert!(swaps.is_empty());
    }

    #[tokio::test]
    async fn rejects_self_swap() {
        let (handler, swaps) = handler_with_users(&["alice"]);

        let err = handler.handle(command("alice", "alice")).await.unwrap_err();

        assert!(matches!(
            err,
            SwapError::ValidationFailed { ref field, .. } if field == "recipient"
        ));
        assert!(swaps.is_empty());
    }

    #[tokio::test]
    async fn rejects_empty_skill() {
        let (handler, swaps) = handler_with_users(&["alice", "bob"]);

        let mut cmd = command("alice", "bob");
        cmd.requested_skill = "   ".to_string();
        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, SwapError::ValidationFailed { .. }));
        assert!(swaps.is_empty());
    }
}
