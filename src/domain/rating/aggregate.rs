//! Running rating aggregate for a user.
//!
//! Stored as a running sum and count rather than a mean: the increment is
//! commutative, so concurrent rating submissions for the same user produce
//! the same final aggregate under any interleaving. The mean is derived.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::RatingValue;

/// Sum and count of all ratings a user has received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingAggregate {
    sum: i64,
    count: i64,
}

impl RatingAggregate {
    /// An aggregate with no ratings applied.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reconstitute an aggregate from persisted sum and count.
    pub fn from_parts(sum: i64, count: i64) -> Self {
        Self { sum, count }
    }

    /// Returns a new aggregate with one more rating applied.
    pub fn apply(&self, value: RatingValue) -> Self {
        Self {
            sum: self.sum + i64::from(value.value()),
            count: self.count + 1,
        }
    }

    /// Sum of all applied rating values.
    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Number of ratings applied.
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Arithmetic mean rounded to two decimals; 0.0 when no ratings exist.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let raw = self.sum as f64 / self.count as f64;
        (raw * 100.0).round() / 100.0
    }
}
