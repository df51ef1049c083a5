//! # Domain Errors
//!
//! Error types for domain-level validation failures.
//!
//! These errors represent caller mistakes (out-of-range weights, invalid
//! ratings, non-positive prices) and data-shape conditions (a `ppsf`-basis
//! adjustment requested for a candidate without a living area). They are
//! surfaced before computation proceeds; the engine never silently coerces
//! them, with the single documented exception of weight normalization.

use thiserror::Error;

/// Domain-level validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A price that must be positive was zero or negative.
    #[error("price must be positive, got {0}")]
    InvalidPrice(f64),

    /// A living area that must be positive was zero, negative, or non-finite.
    #[error("living area must be positive, got {0}")]
    InvalidArea(f64),

    /// A `ppsf`-basis adjustment was requested for a candidate without a
    /// usable living area. Callers must exclude these candidates explicitly.
    #[error("candidate {id} has no living area; cannot adjust on ppsf basis")]
    MissingArea {
        /// Identifier of the candidate that could not be adjusted.
        id: String,
    },

    /// A sold record was constructed without a sale price.
    #[error("sold record requires a sale price")]
    MissingSalePrice,

    /// A quality or condition rating outside the 1-5 ordinal scale.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// A distance that must be non-negative was negative or non-finite.
    #[error("distance must be non-negative, got {0}")]
    InvalidDistance(f64),

    /// A similarity weight outside the documented `[0, 10]` range.
    #[error("weight `{name}` must be within [0, 10], got {value}")]
    WeightOutOfRange {
        /// Name of the offending weight.
        name: &'static str,
        /// Provided value.
        value: f64,
    },

    /// A scoring constraint outside its documented bounds.
    #[error("constraint `{name}` must be within [{min}, {max}], got {value}")]
    ConstraintOutOfRange {
        /// Name of the offending constraint.
        name: &'static str,
        /// Provided value.
        value: f64,
        /// Lower documented bound (inclusive).
        min: f64,
        /// Upper documented bound (inclusive).
        max: f64,
    },
}

impl DomainError {
    /// Creates a missing-area error for the given candidate id.
    #[must_use]
    pub fn missing_area(id: impl Into<String>) -> Self {
        Self::MissingArea { id: id.into() }
    }

    /// Creates a weight-out-of-range error.
    #[must_use]
    pub fn weight_out_of_range(name: &'static str, value: f64) -> Self {
        Self::WeightOutOfRange { name, value }
    }

    /// Creates a constraint-out-of-range error.
    #[must_use]
    pub fn constraint_out_of_range(name: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::ConstraintOutOfRange {
            name,
            value,
            min,
            max,
        }
    }

    /// Returns true if this is a missing-area condition (data insufficiency
    /// rather than caller error).
    #[must_use]
    pub fn is_missing_area(&self) -> bool {
        matches!(self, Self::MissingArea { .. })
    }

    /// Returns true if this error represents an out-of-range input.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::WeightOutOfRange { .. } | Self::ConstraintOutOfRange { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
