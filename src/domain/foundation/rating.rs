//! Rating value object for swap feedback (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Star rating given to a swap partner: 1 (poor) to 5 (excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct RatingValue(i16);

impl RatingValue {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    /// Creates a RatingValue from an integer, returning error if out of range.
    pub fn try_from_i16(value: i16) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ))
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for RatingValue {
    type Error = ValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from_i16(value)
    }
}

impl From<RatingValue> for i16 {
    fn from(rating: RatingValue) -> Self {
        rating.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rating_accepts_boundary_values() {
        assert_eq!(RatingValue::try_from_i16(1).unwrap().value(), 1);
        assert_eq!(RatingValue::try_from_i16(5).unwrap().value(), 5);
    }

    #[test]
    fn rating_rejects_zero_and_six() {
        assert!(RatingValue::try_from_i16(0).is_err());
        assert!(RatingValue::try_from_i16(6).is_err());
    }

    #[test]
    fn rating_rejects_negative_values() {
        assert!(RatingValue::try_from_i16(-1).is_err());
    }

    #[test]
    fn rating_displays_out_of_five() {
        assert_eq!(format!("{}", RatingValue::try_from_i16(4).unwrap()), "4/5");
    }

    #[test]
    fn rating_serializes_as_integer() {
        let rating = RatingValue::try_from_i16(3).unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "3");
    }

    #[test]
    fn rating_deserialization_rejects_out_of_range() {
        let result: Result<RatingValue, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn rating_construction_matches_range(value in -100i16..100) {
            let result = RatingValue::try_from_i16(value);
            prop_assert_eq!(result.is_ok(), (1..=5).contains(&value));
        }
    }
}
