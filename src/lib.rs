//! # comp-select
//!
//! Comparable selection and market-adjustment engine for appraisal
//! reporting.
//!
//! The crate is a pure, synchronous library consumed by a web backend. It
//! covers the numerically sensitive core of an appraisal platform:
//!
//! - **Market trend estimation** — monthly median series with IQR outlier
//!   filtering and a robust Theil-Sen log-linear fit
//!   ([`application::services::market_trend`])
//! - **Time adjustment** — compounding historical sale prices to the
//!   effective date ([`application::services::time_adjustment`])
//! - **Similarity scoring** — weighted multi-factor comparison against the
//!   subject with a full audit breakdown
//!   ([`application::services::similarity`])
//! - **Hi-Lo selection** — a valuation box around a center value, ranking,
//!   and bounded selection of primary comparables
//!   ([`application::services::hilo_selection`])
//!
//! Persistence, HTTP routing, authentication, and report rendering are
//! external collaborators; this crate only defines the data contracts it
//! shares with them ([`domain`], [`ingest`]).
//!
//! # Example
//!
//! ```
//! use comp_select::application::services::hilo_selection::SelectionEngine;
//! use comp_select::application::services::market_trend::TrendEstimator;
//! use comp_select::domain::entities::{CandidateComp, MarketRecord, Subject};
//! use comp_select::domain::value_objects::{
//!     CompKind, ConstraintSet, HiLoSettings, Rating, ValueBasis, WeightSet,
//! };
//! use chrono::NaiveDate;
//!
//! let effective = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let subject = Subject::new(1900.0, Rating::AVERAGE, Rating::AVERAGE).unwrap();
//!
//! let records: Vec<MarketRecord> = (1..=5)
//!     .map(|m| {
//!         let close = NaiveDate::from_ymd_opt(2025, m, 10).unwrap();
//!         MarketRecord::sold(400_000.0, Some(1900.0), close).unwrap()
//!     })
//!     .collect();
//! let trend = TrendEstimator::new(12, ValueBasis::SalePrice)
//!     .with_min_sales_per_month(1)
//!     .estimate(&records, effective);
//!
//! let candidates = vec![
//!     CandidateComp::builder("mls-1", CompKind::Sale, 395_000.0, effective)
//!         .gla(1850.0)
//!         .distance_miles(0.3)
//!         .build()
//!         .unwrap(),
//! ];
//!
//! let engine = SelectionEngine::new(
//!     &WeightSet::default(),
//!     ConstraintSet::default(),
//!     HiLoSettings::default(),
//! );
//! let result = engine
//!     .select(&subject, &candidates, trend.pct_per_month, effective)
//!     .unwrap();
//! assert_eq!(result.selected_sales.len(), 1);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod ingest;
pub mod math;

pub use application::error::{EngineError, EngineResult};
pub use application::services::hilo_selection::{SelectionEngine, SelectionResult};
pub use application::services::market_trend::TrendEstimator;
pub use application::services::similarity::SimilarityScorer;
pub use application::services::trend_cache::{TrendCache, TrendKey};
pub use crate::config::{EngineConfig, ValidatedConfig};
pub use domain::entities::{CandidateComp, MarketRecord, RankedCandidate, Subject};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::value_objects::{
    ConstraintSet, GeoPoint, GeoPolygon, HiLoRange, HiLoSettings, Rating, TrendResult, WeightSet,
};
