//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the SkillSwap domain.

mod auth;
mod errors;
mod ids;
mod rating;
mod state_machine;
mod swap_status;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{RatingId, SwapRequestId, UserId};
pub use rating::RatingValue;
pub use state_machine::StateMachine;
pub use swap_status::SwapStatus;
pub use timestamp::Timestamp;
