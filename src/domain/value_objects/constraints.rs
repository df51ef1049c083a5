//! # Scoring Constraints
//!
//! Bounds used to convert raw attribute differences into `[0, 1]`
//! similarities.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounds for the similarity scoring model.
///
/// The GLA tolerance is the percentage of the subject's living area at which
/// a size difference scores zero; the distance cap is the radius in miles at
/// which a candidate's distance similarity bottoms out.
///
/// # Examples
///
/// ```
/// use comp_select::domain::value_objects::constraints::ConstraintSet;
///
/// let constraints = ConstraintSet::new(10.0, 1.0).unwrap();
/// assert_eq!(constraints.gla_tolerance_pct(), 10.0);
///
/// // Outside the documented bounds is a caller error.
/// assert!(ConstraintSet::new(25.0, 1.0).is_err());
/// assert!(ConstraintSet::new(10.0, 0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    gla_tolerance_pct: f64,
    distance_cap_miles: f64,
}

impl ConstraintSet {
    /// Minimum GLA tolerance, percent of subject GLA.
    pub const GLA_TOLERANCE_MIN: f64 = 5.0;
    /// Maximum GLA tolerance, percent of subject GLA.
    pub const GLA_TOLERANCE_MAX: f64 = 20.0;
    /// Minimum distance cap in miles.
    pub const DISTANCE_CAP_MIN: f64 = 0.25;
    /// Maximum distance cap in miles.
    pub const DISTANCE_CAP_MAX: f64 = 5.0;

    /// Creates a constraint set, enforcing the documented bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ConstraintOutOfRange`] when a value falls
    /// outside its documented range (GLA tolerance 5-20 %, distance cap
    /// 0.25-5.0 miles).
    pub fn new(gla_tolerance_pct: f64, distance_cap_miles: f64) -> DomainResult<Self> {
        if !gla_tolerance_pct.is_finite()
            || !(Self::GLA_TOLERANCE_MIN..=Self::GLA_TOLERANCE_MAX).contains(&gla_tolerance_pct)
        {
            return Err(DomainError::constraint_out_of_range(
                "gla_tolerance_pct",
                gla_tolerance_pct,
                Self::GLA_TOLERANCE_MIN,
                Self::GLA_TOLERANCE_MAX,
            ));
        }
        if !distance_cap_miles.is_finite()
            || !(Self::DISTANCE_CAP_MIN..=Self::DISTANCE_CAP_MAX).contains(&distance_cap_miles)
        {
            return Err(DomainError::constraint_out_of_range(
                "distance_cap_miles",
                distance_cap_miles,
                Self::DISTANCE_CAP_MIN,
                Self::DISTANCE_CAP_MAX,
            ));
        }
        Ok(Self {
            gla_tolerance_pct,
            distance_cap_miles,
        })
    }

    /// Returns the GLA tolerance as a percentage of the subject's GLA.
    #[inline]
    #[must_use]
    pub const fn gla_tolerance_pct(&self) -> f64 {
        self.gla_tolerance_pct
    }

    /// Returns the distance cap in miles.
    #[inline]
    #[must_use]
    pub const fn distance_cap_miles(&self) -> f64 {
        self.distance_cap_miles
    }
}

impl Default for ConstraintSet {
    /// 10 % GLA tolerance, 1.0 mile distance cap.
    fn default() -> Self {
        Self {
            gla_tolerance_pct: 10.0,
            distance_cap_miles: 1.0,
        }
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConstraintSet(glaTol={}%, distCap={}mi)",
            self.gla_tolerance_pct, self.distance_cap_miles
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_documented_range() {
        assert!(ConstraintSet::new(5.0, 0.25).is_ok());
        assert!(ConstraintSet::new(20.0, 5.0).is_ok());
    }

    #[test]
    fn rejects_gla_tolerance_out_of_range() {
        let err = ConstraintSet::new(4.9, 1.0).unwrap_err();
        assert!(matches!(
            err,
            DomainError::ConstraintOutOfRange {
                name: "gla_tolerance_pct",
                ..
            }
        ));
        assert!(ConstraintSet::new(20.1, 1.0).is_err());
    }

    #[test]
    fn rejects_distance_cap_out_of_range() {
        assert!(ConstraintSet::new(10.0, 0.2).is_err());
        assert!(ConstraintSet::new(10.0, 5.5).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(ConstraintSet::new(f64::NAN, 1.0).is_err());
        assert!(ConstraintSet::new(10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn default_within_bounds() {
        let c = ConstraintSet::default();
        assert!(ConstraintSet::new(c.gla_tolerance_pct(), c.distance_cap_miles()).is_ok());
    }
}
