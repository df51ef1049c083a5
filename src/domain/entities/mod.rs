//! # Entities
//!
//! The data shapes flowing through a computation request. All are value
//! objects constructed fresh per request; the engine holds no persistent
//! state between calls.
//!
//! - [`Subject`]: the property being appraised
//! - [`MarketRecord`]: one observed sale or listing (trend input)
//! - [`CandidateComp`]: a market record adapted for scoring
//! - [`RankedCandidate`]: the scored, explainable output shape

pub mod candidate;
pub mod market_record;
pub mod ranked_candidate;
pub mod subject;

pub use candidate::{CandidateBuilder, CandidateComp};
pub use market_record::MarketRecord;
pub use ranked_candidate::{FactorScore, RankedCandidate};
pub use subject::Subject;
