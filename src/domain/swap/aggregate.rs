//! SwapRequest aggregate entity.
//!
//! A swap request is a proposal by one user (the requester) to exchange a
//! skill with another (the recipient). Its status moves only through the
//! transition table encoded in [`SwapAction`]; there is no direct status
//! write.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, StateMachine, SwapRequestId, SwapStatus, Timestamp, UserId,
};

/// Maximum length for skill names.
pub const MAX_SKILL_LENGTH: usize = 100;

/// The role a user plays on a given swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    Requester,
    Recipient,
}

/// Who may perform a given lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRule {
    RequesterOnly,
    RecipientOnly,
    EitherParticipant,
}

impl ActorRule {
    /// Returns true if the given role satisfies this rule.
    pub fn permits(&self, role: ParticipantRole) -> bool {
        match self {
            ActorRule::RequesterOnly => role == ParticipantRole::Requester,
            ActorRule::RecipientOnly => role == ParticipantRole::Recipient,
            ActorRule::EitherParticipant => true,
        }
    }
}

/// Lifecycle actions on a swap request.
///
/// Each action carries the full transition rule: which statuses it may be
/// applied from, who may perform it, and the resulting status. Persistence
/// adapters compose their compare-and-swap predicates from these same rules,
/// so the state check and the state write are a single atomic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapAction {
    Accept,
    Reject,
    Complete,
    Cancel,
}

impl SwapAction {
    /// Statuses this action may be applied from.
    pub fn permitted_from(&self) -> &'static [SwapStatus] {
        match self {
            SwapAction::Accept | SwapAction::Reject => &[SwapStatus::Pending],
            SwapAction::Complete => &[SwapStatus::Accepted],
            SwapAction::Cancel => &[SwapStatus::Pending, SwapStatus::Accepted],
        }
    }

    /// Who may perform this action.
    pub fn actor_rule(&self) -> ActorRule {
        match self {
            SwapAction::Accept | SwapAction::Reject => ActorRule::RecipientOnly,
            SwapAction::Complete => ActorRule::RequesterOnly,
            SwapAction::Cancel => ActorRule::EitherParticipant,
        }
    }

    /// The status this action transitions to.
    pub fn target(&self) -> SwapStatus {
        match self {
            SwapAction::Accept => SwapStatus::Accepted,
            SwapAction::Reject => SwapStatus::Rejected,
            SwapAction::Complete => SwapStatus::Completed,
            SwapAction::Cancel => SwapStatus::Cancelled,
        }
    }

    /// Past-tense label for user-facing messages.
    pub fn past_tense(&self) -> &'static str {
        match self {
            SwapAction::Accept => "accepted",
            SwapAction::Reject => "rejected",
            SwapAction::Complete => "marked as completed",
            SwapAction::Cancel => "cancelled",
        }
    }
}

/// Pure transition function over the lifecycle table.
///
/// Returns the target status, or an error distinguishing a state violation
/// from a role violation. Callers that must not leak this distinction
/// collapse both into their not-found signal.
pub fn transition(
    status: SwapStatus,
    action: SwapAction,
    role: ParticipantRole,
) -> Result<SwapStatus, DomainError> {
    if !action.actor_rule().permits(role) {
        return Err(DomainError::new(
            ErrorCode::Forbidden,
            format!("{:?} may not {:?} this swap request", role, action),
        ));
    }
    if !action.permitted_from().contains(&status) {
        return Err(DomainError::new(
            ErrorCode::InvalidStateTransition,
            format!("Cannot {:?} a swap request in status {}", action, status),
        ));
    }
    Ok(action.target())
}

/// Swap request aggregate.
///
/// # Invariants
///
/// - `requester` and `recipient` always differ
/// - `requested_skill` and `offered_skill` are non-empty, at most 100 chars
/// - `status` changes only through [`SwapAction`] transitions
/// - `updated_at` is refreshed on every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    id: SwapRequestId,
    requester: UserId,
    recipient: UserId,
    requested_skill: String,
    offered_skill: String,
    message: Option<String>,
    status: SwapStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl SwapRequest {
    /// Create a new pending swap request.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if recipient equals requester
    /// - `EmptyField` / `InvalidFormat` if either skill is empty or too long
    pub fn new(
        id: SwapRequestId,
        requester: UserId,
        recipient: UserId,
        requested_skill: String,
        offered_skill: String,
        message: Option<String>,
    ) -> Result<Self, DomainError> {
        if requester == recipient {
            return Err(DomainError::validation(
                "recipient",
                "Cannot create a swap request with yourself",
            ));
        }
        Self::validate_skill("requested_skill", &requested_skill)?;
        Self::validate_skill("offered_skill", &offered_skill)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            requester,
            recipient,
            requested_skill,
            offered_skill,
            message: message.filter(|m| !m.is_empty()),
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a swap request from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SwapRequestId,
        requester: UserId,
        recipient: UserId,
        requested_skill: String,
        offered_skill: String,
        message: Option<String>,
        status: SwapStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            requester,
            recipient,
            requested_skill,
            offered_skill,
            message,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SwapRequestId {
        &self.id
    }

    pub fn requester(&self) -> &UserId {
        &self.requester
    }

    pub fn recipient(&self) -> &UserId {
        &self.recipient
    }

    pub fn requested_skill(&self) -> &str {
        &self.requested_skill
    }

    pub fn offered_skill(&self) -> &str {
        &self.offered_skill
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn status(&self) -> SwapStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Participation
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the role the given user plays on this request, if any.
    pub fn role_of(&self, user_id: &UserId) -> Option<ParticipantRole> {
        if user_id == &self.requester {
            Some(ParticipantRole::Requester)
        } else if user_id == &self.recipient {
            Some(ParticipantRole::Recipient)
        } else {
            None
        }
    }

    /// Returns true if the given user is the requester or the recipient.
    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.role_of(user_id).is_some()
    }

    /// Returns the other participant, if the given user is one.
    pub fn other_participant(&self, user_id: &UserId) -> Option<&UserId> {
        match self.role_of(user_id)? {
            ParticipantRole::Requester => Some(&self.recipient),
            ParticipantRole::Recipient => Some(&self.requester),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a lifecycle action on behalf of a caller.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not a participant or lacks the role
    /// - `InvalidStateTransition` if the current status does not permit it
    pub fn apply(&mut self, action: SwapAction, caller: &UserId) -> Result<(), DomainError> {
        let role = self.role_of(caller).ok_or_else(|| {
            DomainError::new(
                ErrorCode::Forbidden,
                "Caller is not a participant of this swap request",
            )
        })?;
        let target = transition(self.status, action, role)?;
        // transition() already enforced the table; transition_to keeps the
        // status enum's own machine in agreement.
        self.status = self.status.transition_to(target)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Update the free-text message.
    ///
    /// Only the requester may edit, and only while the request is pending.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not the requester
    /// - `InvalidStateTransition` if the request is no longer pending
    pub fn update_message(
        &mut self,
        caller: &UserId,
        message: Option<String>,
    ) -> Result<(), DomainError> {
        if self.role_of(caller) != Some(ParticipantRole::Requester) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the requester may edit a swap request",
            ));
        }
        if self.status != SwapStatus::Pending {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Only pending swap requests can be edited",
            ));
        }
        self.message = message.filter(|m| !m.is_empty());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn validate_skill(field: &str, value: &str) -> Result<(), DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                format!("Field '{}' cannot be empty", field),
            ));
        }
        if value.len() > MAX_SKILL_LENGTH {
            return Err(DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Field '{}' exceeds {} characters", field, MAX_SKILL_LENGTH),
            ));
        }
        Ok(())
    }
}
