//! # Hi-Lo Range & Selection Engine
//!
//! Orchestrates time adjustment, scoring, and selection over a candidate
//! pool: determine a center value, build the Hi-Lo box around it, rank all
//! candidates by composite similarity, and select a bounded number of
//! in-box sales and listings.
//!
//! The engine is read-only over its inputs and deterministic: re-running
//! on identical inputs yields the identical ranked order and selected ids.
//! Per-candidate scoring has no cross-candidate dependency and runs as a
//! parallel map before the single sequential sort.

use crate::application::error::{EngineError, EngineResult};
use crate::application::services::similarity::SimilarityScorer;
use crate::application::services::time_adjustment::{AdjustedValue, adjust_candidate};
use crate::domain::entities::{CandidateComp, RankedCandidate, Subject};
use crate::domain::value_objects::{
    CenterBasis, CompId, CompKind, ConstraintSet, HiLoRange, HiLoSettings, WeightSet,
};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Number of top selected sales promoted to primaries.
const PRIMARY_SALES: usize = 3;

/// Number of top selected listings promoted to listing primaries.
const PRIMARY_LISTINGS: usize = 2;

/// Result of a Hi-Lo selection run.
///
/// The selected id lists are in score order. `primaries` and
/// `listing_primaries` are prefixes of the selected lists and are never
/// padded with outside-box candidates; with thin data they are simply
/// shorter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    /// The valuation box candidates were admitted against.
    pub range: HiLoRange,
    /// All ranked candidates, best first.
    pub ranked: Vec<RankedCandidate>,
    /// Selected in-box sales, up to `max_sales`, in score order.
    pub selected_sales: Vec<CompId>,
    /// Selected in-box listings, up to `max_listings`, in score order.
    pub selected_listings: Vec<CompId>,
    /// Top selected sales promoted to primaries (at most 3).
    pub primaries: Vec<CompId>,
    /// Top selected listings promoted to listing primaries (at most 2).
    pub listing_primaries: Vec<CompId>,
    /// Candidates excluded because the `ppsf` basis requires a living area.
    pub excluded_missing_area: usize,
    /// True if the center determination used a documented fallback
    /// (unresolved primaries or an empty polygon subset).
    pub center_fell_back: bool,
}

impl SelectionResult {
    /// Returns the best ranked candidate, if any.
    #[must_use]
    pub fn best(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }

    /// Returns how many ranked candidates landed inside the box.
    #[must_use]
    pub fn inside_box_count(&self) -> usize {
        self.ranked.iter().filter(|r| r.inside_box).count()
    }
}

/// The comparable selection engine.
///
/// Holds the scoring configuration for a run; each [`SelectionEngine::select`]
/// call is an independent, stateless computation over its inputs.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    scorer: SimilarityScorer,
    settings: HiLoSettings,
}

impl SelectionEngine {
    /// Creates an engine from weights, constraints, and Hi-Lo settings.
    #[must_use]
    pub fn new(weights: &WeightSet, constraints: ConstraintSet, settings: HiLoSettings) -> Self {
        Self {
            scorer: SimilarityScorer::new(weights, constraints),
            settings,
        }
    }

    /// Returns the engine's settings.
    #[must_use]
    pub const fn settings(&self) -> &HiLoSettings {
        &self.settings
    }

    /// Ranks the candidate pool and selects in-box sales and listings.
    ///
    /// `pct_per_month` is the market trend rate used for time adjustment,
    /// typically from a [`crate::application::services::market_trend::TrendEstimator`]
    /// run over the same market.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmptyCandidatePool`] when no candidate survives
    ///   filtering — distinct from the non-error "no matches" case where
    ///   candidates rank but none land inside the box.
    /// - [`EngineError::MissingModelValue`] when the `model` center basis
    ///   has no supplied value.
    /// - [`EngineError::Domain`] for invariant violations in the inputs.
    pub fn select(
        &self,
        subject: &Subject,
        candidates: &[CandidateComp],
        pct_per_month: f64,
        effective_date: NaiveDate,
    ) -> EngineResult<SelectionResult> {
        // Time-adjust every candidate; ppsf candidates without a living
        // area cannot be adjusted and are excluded with a trace.
        let mut excluded_missing_area = 0;
        let mut adjusted: Vec<(&CandidateComp, AdjustedValue)> =
            Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match adjust_candidate(candidate, effective_date, pct_per_month, self.settings.basis)
            {
                Ok(value) => adjusted.push((candidate, value)),
                Err(err) if err.is_missing_area() => {
                    excluded_missing_area += 1;
                    warn!(
                        id = %candidate.id(),
                        "candidate excluded: no living area under ppsf basis"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
        if adjusted.is_empty() {
            return Err(EngineError::EmptyCandidatePool {
                excluded_missing_area,
            });
        }

        let (center, center_fell_back) = self.center(&adjusted)?;
        let range = HiLoRange::around(
            center,
            self.settings.box_pct,
            effective_date,
            self.settings.basis,
        );

        // Ranking pool: the polygon filter is strict here, unlike the
        // center determination which falls back to the full pool.
        let pool: Vec<(&CandidateComp, AdjustedValue)> = if self.settings.inside_polygon_only {
            adjusted
                .iter()
                .filter(|(candidate, _)| candidate.in_polygon())
                .copied()
                .collect()
        } else {
            adjusted
        };
        if pool.is_empty() {
            return Err(EngineError::EmptyCandidatePool {
                excluded_missing_area,
            });
        }

        // Score pass: independent per candidate, parallel map.
        let mut ranked: Vec<RankedCandidate> = pool
            .par_iter()
            .map(|(candidate, adjusted_value)| {
                let breakdown = self.scorer.score(subject, candidate);
                RankedCandidate {
                    id: candidate.id().clone(),
                    kind: candidate.kind(),
                    inside_box: range.contains(adjusted_value.value),
                    in_polygon: candidate.in_polygon(),
                    adjusted_value: adjusted_value.value,
                    score: breakdown.score,
                    breakdown: breakdown.factors,
                }
            })
            .collect();

        // Score descending; equal scores order by id ascending so reruns
        // are byte-identical.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut selected_sales = Vec::new();
        let mut selected_listings = Vec::new();
        for candidate in ranked.iter().filter(|r| r.inside_box) {
            match candidate.kind {
                CompKind::Sale if selected_sales.len() < self.settings.max_sales => {
                    selected_sales.push(candidate.id.clone());
                }
                CompKind::Listing if selected_listings.len() < self.settings.max_listings => {
                    selected_listings.push(candidate.id.clone());
                }
                _ => {}
            }
        }
        let primaries: Vec<CompId> = selected_sales.iter().take(PRIMARY_SALES).cloned().collect();
        let listing_primaries: Vec<CompId> = selected_listings
            .iter()
            .take(PRIMARY_LISTINGS)
            .cloned()
            .collect();

        debug!(
            center,
            lo = range.lo(),
            hi = range.hi(),
            ranked = ranked.len(),
            inside_box = ranked.iter().filter(|r| r.inside_box).count(),
            excluded_missing_area,
            "hi-lo selection complete"
        );

        Ok(SelectionResult {
            range,
            ranked,
            selected_sales,
            selected_listings,
            primaries,
            listing_primaries,
            excluded_missing_area,
            center_fell_back,
        })
    }

    /// Determines the center value per the configured basis.
    ///
    /// Returns the center and whether a documented fallback was taken.
    fn center(
        &self,
        adjusted: &[(&CandidateComp, AdjustedValue)],
    ) -> EngineResult<(f64, bool)> {
        match self.settings.center_basis {
            CenterBasis::Model => self
                .settings
                .model_value
                .ok_or(EngineError::MissingModelValue)
                .map(|value| (value, false)),
            CenterBasis::WeightedPrimaries => {
                let values: Vec<f64> = adjusted
                    .iter()
                    .filter(|(candidate, _)| self.settings.primary_ids.contains(candidate.id()))
                    .map(|(_, adj)| adj.value)
                    .collect();
                if values.is_empty() {
                    warn!("no primary ids resolved; falling back to median center");
                    Ok((median_value(adjusted, false), true))
                } else {
                    Ok((values.iter().sum::<f64>() / values.len() as f64, false))
                }
            }
            CenterBasis::MedianTimeAdj => {
                if self.settings.inside_polygon_only {
                    let has_inside = adjusted.iter().any(|(c, _)| c.in_polygon());
                    if has_inside {
                        return Ok((median_value(adjusted, true), false));
                    }
                    warn!("no polygon-contained candidates; median center uses full pool");
                    return Ok((median_value(adjusted, false), true));
                }
                Ok((median_value(adjusted, false), false))
            }
        }
    }
}

/// Median of the adjusted values, optionally restricted to
/// polygon-contained candidates. The caller guarantees a non-empty input
/// for the chosen restriction.
fn median_value(adjusted: &[(&CandidateComp, AdjustedValue)], polygon_only: bool) -> f64 {
    let values: Vec<f64> = adjusted
        .iter()
        .filter(|(candidate, _)| !polygon_only || candidate.in_polygon())
        .map(|(_, adj)| adj.value)
        .collect();
    crate::math::median(&values).unwrap_or(0.0)
}
