//! SwapStatus enum for tracking lifecycle of swap requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of a swap request.
///
/// Rejected, Completed, and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl SwapStatus {
    /// Returns the wire/storage name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Completed => "completed",
            SwapStatus::Cancelled => "cancelled",
        }
    }
}

impl StateMachine for SwapStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SwapStatus::*;
        matches!(
            (self, target),
            (Pending, Accepted)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Accepted, Completed)
                | (Accepted, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SwapStatus::*;
        match self {
            Pending => vec![Accepted, Rejected, Cancelled],
            Accepted => vec![Completed, Cancelled],
            Rejected | Completed | Cancelled => vec![],
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SwapStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SwapStatus::Pending),
            "accepted" => Ok(SwapStatus::Accepted),
            "rejected" => Ok(SwapStatus::Rejected),
            "completed" => Ok(SwapStatus::Completed),
            "cancelled" => Ok(SwapStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("Unknown swap status: {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(SwapStatus::default(), SwapStatus::Pending);
    }

    #[test]
    fn pending_can_be_accepted_rejected_or_cancelled() {
        assert!(SwapStatus::Pending.can_transition_to(&SwapStatus::Accepted));
        assert!(SwapStatus::Pending.can_transition_to(&SwapStatus::Rejected));
        assert!(SwapStatus::Pending.can_transition_to(&SwapStatus::Cancelled));
    }

    #[test]
    fn pending_cannot_be_completed_directly() {
        assert!(!SwapStatus::Pending.can_transition_to(&SwapStatus::Completed));
    }

    #[test]
    fn accepted_can_be_completed_or_cancelled() {
        assert!(SwapStatus::Accepted.can_transition_to(&SwapStatus::Completed));
        assert!(SwapStatus::Accepted.can_transition_to(&SwapStatus::Cancelled));
        assert!(!SwapStatus::Accepted.can_transition_to(&SwapStatus::Rejected));
    }

    #[test]
    fn rejected_completed_and_cancelled_are_terminal() {
        assert!(SwapStatus::Rejected.is_terminal());
        assert!(SwapStatus::Completed.is_terminal());
        assert!(SwapStatus::Cancelled.is_terminal());
        assert!(!SwapStatus::Pending.is_terminal());
        assert!(!SwapStatus::Accepted.is_terminal());
    }

    #[test]
    fn status_roundtrips_through_str() {
        for status in [
            SwapStatus::Pending,
            SwapStatus::Accepted,
            SwapStatus::Rejected,
            SwapStatus::Completed,
            SwapStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<SwapStatus>().unwrap(), status);
        }
    }

    #[test]
    fn from_str_rejects_unknown_status() {
        assert!("archived".parse::<SwapStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&SwapStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
