//! PostgreSQL adapters for the repository and directory ports.

mod rating_repository;
mod swap_repository;
mod user_directory;

pub use rating_repository::PostgresSwapRatingRepository;
pub use swap_repository::PostgresSwapRequestRepository;
pub use user_directory::PostgresUserDirectory;
