//! Domain layer - aggregates, value objects, and domain errors.

pub mod foundation;
pub mod rating;
pub mod swap;
