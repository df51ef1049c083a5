//! # Engine Errors
//!
//! Error types for the application layer.
//!
//! Validation errors stop the pipeline before computation proceeds.
//! Data-insufficiency conditions (thin trend data, candidates excluded for
//! missing GLA, empty boxes) are not errors: they continue with a recorded
//! fallback. Only a truly empty candidate pool after filtering — as opposed
//! to "no candidates inside the box" — surfaces as
//! [`EngineError::EmptyCandidatePool`].

use crate::domain::errors::DomainError;
use thiserror::Error;

/// Application-layer error for engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Domain validation failure.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Input validation failed at the engine boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded or failed boundary validation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No candidates survived filtering; there is nothing to rank.
    #[error(
        "empty candidate pool after filtering ({excluded_missing_area} excluded for missing area)"
    )]
    EmptyCandidatePool {
        /// Candidates excluded because the `ppsf` basis needs a living area.
        excluded_missing_area: usize,
    },

    /// The `model` center basis requires an externally supplied value.
    #[error("center basis `model` requires a model value")]
    MissingModelValue,
}

impl EngineError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if this is a validation or configuration error
    /// (caller mistake rather than data insufficiency).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Configuration(_) | Self::Domain(_)
        )
    }

    /// Returns true if the candidate pool was empty after filtering.
    #[must_use]
    pub fn is_empty_pool(&self) -> bool {
        matches!(self, Self::EmptyCandidatePool { .. })
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
