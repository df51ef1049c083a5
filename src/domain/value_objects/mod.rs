//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity and Ordinal Types
//!
//! - [`CompId`]: string-backed comparable identifier (lexicographic order)
//! - [`Rating`]: validated 1-5 quality/condition ordinal
//!
//! ## Scoring Inputs
//!
//! - [`WeightSet`] / [`NormalizedWeights`]: factor weights and their
//!   normalized, sum-to-one form
//! - [`ConstraintSet`]: GLA tolerance and distance cap bounds
//!
//! ## Results
//!
//! - [`HiLoRange`]: the valuation box around a center value
//! - [`TrendResult`]: fitted market trend with its method tag
//!
//! ## Geometry
//!
//! - [`GeoPoint`] / [`GeoPolygon`]: market polygon containment and area

pub mod constraints;
pub mod enums;
pub mod geo;
pub mod hilo;
pub mod ids;
pub mod rating;
pub mod trend;
pub mod weights;

pub use constraints::ConstraintSet;
pub use enums::{CenterBasis, CompKind, RecordStatus, TrendMethod, ValueBasis};
pub use geo::{GeoPoint, GeoPolygon};
pub use hilo::{HiLoRange, HiLoSettings};
pub use ids::CompId;
pub use rating::Rating;
pub use trend::TrendResult;
pub use weights::{Factor, NormalizedWeights, WeightSet};
