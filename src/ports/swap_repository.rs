//! Swap request repository port.
//!
//! Defines the contract for persisting swap requests and for performing
//! lifecycle transitions atomically.
//!
//! # Design
//!
//! - **Caller-scoped reads**: every externally-reachable read or mutation
//!   goes through a predicate that requires the caller to be a participant.
//! - **Atomic transitions**: `transition` applies the state check and the
//!   state write as one operation (a compare-and-swap over id, expected
//!   status, and actor role), so concurrent callers on the same record see
//!   at most one winner.

use crate::domain::foundation::{DomainError, SwapRequestId, UserId};
use crate::domain::swap::{SwapAction, SwapRequest};
use async_trait::async_trait;

/// Repository port for swap request persistence.
#[async_trait]
pub trait SwapRequestRepository: Send + Sync {
    /// Save a new swap request.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, swap: &SwapRequest) -> Result<(), DomainError>;

    /// Unscoped lookup by id.
    ///
    /// Internal use only (transition-failure audit logging); never expose
    /// the result to a caller without a visibility check.
    async fn find_by_id(&self, id: &SwapRequestId)
        -> Result<Option<SwapRequest>, DomainError>;

    /// Caller-scoped lookup: `Some` only if the caller is a participant.
    async fn find_visible(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
    ) -> Result<Option<SwapRequest>, DomainError>;

    /// All requests where the caller is a participant, newest first.
    async fn list_visible(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError>;

    /// Requests sent by the caller, newest first.
    async fn list_sent(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError>;

    /// Requests received by the caller, newest first.
    async fn list_received(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError>;

    /// Atomically apply a lifecycle action.
    ///
    /// The record is updated only if it is in a status the action permits
    /// and the caller holds the role the action requires; the check and the
    /// write are a single operation. Returns the updated record, or `None`
    /// if the predicate did not match (absent, wrong status, or wrong role —
    /// indistinguishable by design).
    async fn transition(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
        action: SwapAction,
    ) -> Result<Option<SwapRequest>, DomainError>;

    /// Persist field changes made on an already-loaded aggregate.
    ///
    /// # Errors
    ///
    /// - `SwapRequestNotFound` if the record no longer exists
    /// - `DatabaseError` on persistence failure
    async fn update(&self, swap: &SwapRequest) -> Result<(), DomainError>;

    /// Delete a caller-visible request and (cascade) its ratings.
    ///
    /// Returns false if no visible record matched.
    async fn delete_visible(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn swap_request_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SwapRequestRepository) {}
    }
}
