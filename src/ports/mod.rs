//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SwapRequestRepository` - swap request persistence and atomic transitions
//! - `SwapRatingRepository` - write-once rating persistence with uniqueness
//! - `UserDirectory` - consumed user-profile contract plus the aggregate write
//! - `SessionValidator` - bearer token validation

mod rating_repository;
mod session_validator;
mod swap_repository;
mod user_directory;

pub use rating_repository::SwapRatingRepository;
pub use session_validator::SessionValidator;
pub use swap_repository::SwapRequestRepository;
pub use user_directory::{UserDirectory, UserFilter, UserProfile};
