//! ListSwapsHandler - Query handler for all caller-visible swaps.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::swap::{SwapError, SwapRequest};
use crate::ports::SwapRequestRepository;

/// Handler for listing every swap request the caller participates in.
pub struct ListSwapsHandler {
    swaps: Arc<dyn SwapRequestRepository>,
}

impl ListSwapsHandler {
    pub fn new(swaps: Arc<dyn SwapRequestRepository>) -> Self {
        Self { swaps }
    }

    /// Newest first, sent and received mixed.
    pub async fn handle(&self, caller: &UserId) -> Result<Vec<SwapRequest>, SwapError> {
        Ok(self.swaps.list_visible(caller).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySwapRequestRepository;
    use crate::domain::foundation::SwapRequestId;
    use crate::domain::swap::SwapRequest;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn swap(requester: &str, recipient: &str) -> SwapRequest {
        SwapRequest::new(
            SwapRequestId::new(),
            user(requester),
            user(recipient),
            "Yoga".to_string(),
            "Guitar".to_string(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_only_swaps_involving_caller() {
        let swaps = Arc::new(InMemorySwapRequestRepository::new());
        swaps.save(&swap("alice", "bob")).await.unwrap();
        swaps.save(&swap("carol", "alice")).await.unwrap();
        swaps.save(&swap("carol", "dave")).await.unwrap();

        let handler = ListSwapsHandler::new(swaps);
        let visible = handler.handle(&user("alice")).await.unwrap();

        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|s| s.is_participant(&user("alice"))));
    }

    #[tokio::test]
    async fn empty_for_uninvolved_caller() {
        let swaps = Arc::new(InMemorySwapRequestRepository::new());
        swaps.save(&swap("alice", "bob")).await.unwrap();

        let handler = ListSwapsHandler::new(swaps);
        assert!(handler.handle(&user("mallory")).await.unwrap().is_empty());
    }
}
