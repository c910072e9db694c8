//! HTTP adapters - axum routers, handlers and DTOs.

pub mod middleware;
pub mod rating;
pub mod swap;
