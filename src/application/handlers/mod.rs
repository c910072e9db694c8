//! Command and query handlers, grouped by aggregate.

pub mod rating;
pub mod swap;
