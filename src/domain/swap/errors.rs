//! Swap-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SwapRequestId};

/// Swap-specific errors.
///
/// "Not found" deliberately covers records that exist but belong to someone
/// else or are in the wrong state: callers must not be able to distinguish
/// the cases. The internal cause is logged before the collapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    /// Swap request absent, not visible to the caller, or not in a state
    /// that permits the attempted operation.
    NotFound(SwapRequestId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SwapError {
    pub fn not_found(id: SwapRequestId) -> Self {
        SwapError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SwapError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SwapError::Infrastructure(message.into())
    }
}

impl std::fmt::Display for SwapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapError::NotFound(id) => write!(f, "Swap request not found: {}", id),
            SwapError::ValidationFailed { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            SwapError::Infrastructure(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for SwapError {}

impl From<DomainError> for SwapError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => SwapError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SwapError::Infrastructure(err.to_string()),
        }
    }
}
