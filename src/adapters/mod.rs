//! Adapters - implementations of the ports for concrete technologies.

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
