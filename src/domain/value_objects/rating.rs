//! # Rating Value Object
//!
//! Validated 1-5 ordinal rating for property quality and condition.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordinal quality or condition rating on the 1-5 appraisal scale.
///
/// 1 is the best rating and 5 the worst, matching the Q/C rating convention
/// on the source feed. The maximum possible difference between two ratings
/// is [`Rating::SPAN`].
///
/// # Examples
///
/// ```
/// use comp_select::domain::value_objects::rating::Rating;
///
/// let q3 = Rating::new(3).unwrap();
/// let q5 = Rating::new(5).unwrap();
/// assert_eq!(q3.diff(q5), 2);
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Maximum possible difference between two ratings on the 1-5 scale.
    pub const SPAN: u8 = 4;

    /// The midpoint of the scale, used as a builder default.
    pub const AVERAGE: Self = Self(3);

    /// Creates a rating, rejecting values outside 1-5.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRating`] for values outside the scale.
    pub fn new(value: u8) -> DomainResult<Self> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidRating(value))
        }
    }

    /// Returns the raw ordinal value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the absolute difference from another rating.
    #[inline]
    #[must_use]
    pub const fn diff(self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
