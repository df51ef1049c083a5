//! # Engine Services
//!
//! The computational services of the engine, leaves first:
//!
//! - [`time_adjustment`]: sale price to effective-date value
//! - [`market_trend`]: robust monthly trend from sale records
//! - [`similarity`]: weighted multi-factor scoring against the subject
//! - [`hilo_selection`]: center, box, rank, and bounded selection
//! - [`trend_cache`]: caller-invalidated cache of computed trends

pub mod hilo_selection;
pub mod market_trend;
pub mod similarity;
pub mod time_adjustment;
pub mod trend_cache;

pub use hilo_selection::{SelectionEngine, SelectionResult};
pub use market_trend::TrendEstimator;
pub use similarity::{ScoreBreakdown, SimilarityScorer};
pub use time_adjustment::{AdjustedValue, adjust_candidate, adjust_value, adjustment_factor, months_between};
pub use trend_cache::{TrendCache, TrendKey};
