//! HTTP adapter for rating endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::RatingHandlers;
pub use routes::rating_routes;
