//! # Subject Property
//!
//! The property whose value is being estimated. Immutable input per run.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::Rating;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The subject property of an appraisal run.
///
/// # Examples
///
/// ```
/// use comp_select::domain::entities::subject::Subject;
/// use comp_select::domain::value_objects::Rating;
///
/// let subject = Subject::new(
///     1875.0,
///     Rating::new(3).unwrap(),
///     Rating::new(3).unwrap(),
/// ).unwrap();
/// assert_eq!(subject.gla(), 1875.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    gla: f64,
    quality: Rating,
    condition: Rating,
}

impl Subject {
    /// Creates a subject property.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArea`] if the gross living area is not
    /// a positive finite number.
    pub fn new(gla: f64, quality: Rating, condition: Rating) -> DomainResult<Self> {
        if !gla.is_finite() || gla <= 0.0 {
            return Err(DomainError::InvalidArea(gla));
        }
        Ok(Self {
            gla,
            quality,
            condition,
        })
    }

    /// Returns the gross living area in square feet.
    #[inline]
    #[must_use]
    pub const fn gla(&self) -> f64 {
        self.gla
    }

    /// Returns the quality rating.
    #[inline]
    #[must_use]
    pub const fn quality(&self) -> Rating {
        self.quality
    }

    /// Returns the condition rating.
    #[inline]
    #[must_use]
    pub const fn condition(&self) -> Rating {
        self.condition
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subject(gla={}, q={}, c={})",
            self.gla, self.quality, self.condition
        )
    }
}
