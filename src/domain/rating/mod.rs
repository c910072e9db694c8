//! Rating domain - per-swap ratings and the running user aggregate.

mod aggregate;
mod entity;
mod errors;

pub use aggregate::RatingAggregate;
pub use entity::SwapRating;
pub use errors::RatingError;
