//! Swap rating command and query handlers.

mod get_rating;
mod list_ratings;
mod submit_rating;

pub use get_rating::{GetRatingHandler, GetRatingQuery};
pub use list_ratings::ListRatingsHandler;
pub use submit_rating::{SubmitRatingCommand, SubmitRatingHandler, SubmitRatingResult};
