//! HTTP adapter for swap endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SwapHandlers;
pub use routes::swap_routes;
