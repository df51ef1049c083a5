//! # Similarity Weights
//!
//! Caller-supplied factor weights and their normalized form.
//!
//! Weights arrive unnormalized from the configuration boundary and are
//! normalized to sum to 1 before scoring. Normalization always succeeds:
//! when every weight is zero the engine falls back to equal weighting across
//! the factors in play, so scoring can never divide by zero or produce NaN.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A similarity factor scored by the engine.
///
/// The five core factors are always scored. [`Factor::Location`]
/// participates only when the caller supplies a location weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Factor {
    /// Distance from the subject, against the distance cap.
    Distance = 0,
    /// Months since sale, against a fixed 12-month horizon.
    Recency = 1,
    /// Gross living area difference, against the GLA tolerance.
    Gla = 2,
    /// Quality rating difference on the 1-5 ordinal scale.
    Quality = 3,
    /// Condition rating difference on the 1-5 ordinal scale.
    Condition = 4,
    /// Market-polygon containment.
    Location = 5,
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance => write!(f, "distance"),
            Self::Recency => write!(f, "recency"),
            Self::Gla => write!(f, "gla"),
            Self::Quality => write!(f, "quality"),
            Self::Condition => write!(f, "condition"),
            Self::Location => write!(f, "location"),
        }
    }
}

/// Unnormalized factor weights as provided by the caller.
///
/// Each weight must lie within [`WeightSet::MIN`]..=[`WeightSet::MAX`];
/// out-of-range values are a caller error, not a silent correction.
///
/// # Examples
///
/// ```
/// use comp_select::domain::value_objects::weights::WeightSet;
///
/// let weights = WeightSet::new(2.0, 2.0, 2.0, 1.0, 1.0).unwrap();
/// let normalized = weights.normalized();
/// let sum: f64 = normalized.entries().map(|(_, w)| w).sum();
/// assert!((sum - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    distance: f64,
    recency: f64,
    gla: f64,
    quality: f64,
    condition: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<f64>,
}

impl WeightSet {
    /// Minimum accepted weight.
    pub const MIN: f64 = 0.0;
    /// Maximum accepted weight.
    pub const MAX: f64 = 10.0;

    /// Creates a weight set for the five core factors.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WeightOutOfRange`] if any weight falls outside
    /// `[0, 10]` or is not finite.
    pub fn new(
        distance: f64,
        recency: f64,
        gla: f64,
        quality: f64,
        condition: f64,
    ) -> DomainResult<Self> {
        Ok(Self {
            distance: check("distance", distance)?,
            recency: check("recency", recency)?,
            gla: check("gla", gla)?,
            quality: check("quality", quality)?,
            condition: check("condition", condition)?,
            location: None,
        })
    }

    /// Adds a location weight, enabling the polygon-containment factor.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WeightOutOfRange`] if the weight falls outside
    /// `[0, 10]` or is not finite.
    pub fn with_location(mut self, location: f64) -> DomainResult<Self> {
        self.location = Some(check("location", location)?);
        Ok(self)
    }

    /// Returns the distance weight.
    #[inline]
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the recency weight.
    #[inline]
    #[must_use]
    pub const fn recency(&self) -> f64 {
        self.recency
    }

    /// Returns the GLA weight.
    #[inline]
    #[must_use]
    pub const fn gla(&self) -> f64 {
        self.gla
    }

    /// Returns the quality weight.
    #[inline]
    #[must_use]
    pub const fn quality(&self) -> f64 {
        self.quality
    }

    /// Returns the condition weight.
    #[inline]
    #[must_use]
    pub const fn condition(&self) -> f64 {
        self.condition
    }

    /// Returns the location weight, if one was supplied.
    #[inline]
    #[must_use]
    pub const fn location(&self) -> Option<f64> {
        self.location
    }

    /// Normalizes this weight set so the weights sum to 1.
    ///
    /// If every weight is zero, falls back to equal weighting across the
    /// factors in play (the five core factors, plus location when supplied).
    #[must_use]
    pub fn normalized(&self) -> NormalizedWeights {
        let mut entries = vec![
            (Factor::Distance, self.distance),
            (Factor::Recency, self.recency),
            (Factor::Gla, self.gla),
            (Factor::Quality, self.quality),
            (Factor::Condition, self.condition),
        ];
        if let Some(location) = self.location {
            entries.push((Factor::Location, location));
        }

        let sum: f64 = entries.iter().map(|(_, w)| w).sum();
        if sum > 0.0 {
            for entry in &mut entries {
                entry.1 /= sum;
            }
        } else {
            let equal = 1.0 / entries.len() as f64;
            for entry in &mut entries {
                entry.1 = equal;
            }
        }
        NormalizedWeights { entries }
    }
}

impl Default for WeightSet {
    /// Equal unit weights across the five core factors.
    fn default() -> Self {
        Self {
            distance: 1.0,
            recency: 1.0,
            gla: 1.0,
            quality: 1.0,
            condition: 1.0,
            location: None,
        }
    }
}

fn check(name: &'static str, value: f64) -> DomainResult<f64> {
    if value.is_finite() && (WeightSet::MIN..=WeightSet::MAX).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::weight_out_of_range(name, value))
    }
}

/// Factor weights normalized to sum to 1.
///
/// Construction is only possible through [`WeightSet::normalized`], so a
/// value of this type always satisfies the sum-to-one invariant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedWeights {
    entries: Vec<(Factor, f64)>,
}

impl NormalizedWeights {
    /// Iterates over `(factor, weight)` pairs in factor order.
    pub fn entries(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the number of factors in play.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no factors are in play (never the case in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
