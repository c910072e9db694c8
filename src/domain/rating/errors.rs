//! Rating-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, RatingId, SwapRequestId};

/// Rating-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// Rating absent or not authored by the caller.
    NotFound(RatingId),
    /// Referenced swap request absent or the rater is not a participant.
    SwapNotFound(SwapRequestId),
    /// The referenced swap request has not been completed.
    SwapNotCompleted(SwapRequestId),
    /// A rating by this rater for this swap already exists.
    Duplicate(SwapRequestId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl RatingError {
    pub fn not_found(id: RatingId) -> Self {
        RatingError::NotFound(id)
    }

    pub fn swap_not_found(id: SwapRequestId) -> Self {
        RatingError::SwapNotFound(id)
    }

    pub fn swap_not_completed(id: SwapRequestId) -> Self {
        RatingError::SwapNotCompleted(id)
    }

    pub fn duplicate(id: SwapRequestId) -> Self {
        RatingError::Duplicate(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RatingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RatingError::Infrastructure(message.into())
    }
}

impl std::fmt::Display for RatingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingError::NotFound(id) => write!(f, "Rating not found: {}", id),
            RatingError::SwapNotFound(id) => write!(f, "Swap request not found: {}", id),
            RatingError::SwapNotCompleted(id) => {
                write!(f, "Swap request {} has not been completed", id)
            }
            RatingError::Duplicate(id) => {
                write!(f, "A rating for swap request {} already exists", id)
            }
            RatingError::ValidationFailed { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            RatingError::Infrastructure(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for RatingError {}

impl From<DomainError> for RatingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => RatingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => RatingError::Infrastructure(err.to_string()),
        }
    }
}
