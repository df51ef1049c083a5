//! # Ingestion Boundary
//!
//! Adapters that turn loosely-typed upstream payloads into the engine's
//! validated input types. Schema versioning lives here, not in the scoring
//! core: the v2 and legacy field spellings are parsed as tagged variants
//! and converted after validation, never sniffed property-by-property
//! inside the engine.

pub mod legacy;

pub use legacy::{
    CandidateIngest, IngestReport, parse_candidates, parse_market_records, parse_trend_rate,
};
