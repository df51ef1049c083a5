//! # Similarity Scoring Model
//!
//! Scores a candidate comparable against the subject across weighted
//! factors, producing a composite score with a per-factor breakdown.
//!
//! Every similarity is normalized to `[0, 1]` with 1 meaning identical to
//! the subject. The composite score is computed as the exact sum of the
//! breakdown contributions, so `score == sum(contribution)` holds by
//! construction and the full-precision value is what ranking sorts on;
//! two-decimal rounding exists only for display.

use crate::domain::entities::ranked_candidate::FactorScore;
use crate::domain::entities::{CandidateComp, Subject};
use crate::domain::value_objects::{ConstraintSet, Factor, NormalizedWeights, WeightSet};
use serde::Serialize;

/// Fixed recency horizon: a sale 12 or more months old scores zero.
const RECENCY_HORIZON_MONTHS: f64 = 12.0;

/// Span of the 1-5 ordinal rating scale.
const RATING_SPAN: f64 = 4.0;

/// A composite score with its per-factor audit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Per-factor similarity, weight, and contribution.
    pub factors: Vec<FactorScore>,
    /// Composite score: the exact sum of the contributions.
    pub score: f64,
}

impl ScoreBreakdown {
    /// Returns the score rounded to two decimal places for display.
    #[must_use]
    pub fn display_score(&self) -> f64 {
        (self.score * 100.0).round() / 100.0
    }
}

/// Scores candidates against a subject with normalized factor weights.
///
/// # Examples
///
/// ```
/// use comp_select::application::services::similarity::SimilarityScorer;
/// use comp_select::domain::entities::{CandidateComp, Subject};
/// use comp_select::domain::value_objects::{
///     CompKind, ConstraintSet, Rating, WeightSet,
/// };
/// use chrono::NaiveDate;
///
/// let subject = Subject::new(1875.0, Rating::AVERAGE, Rating::AVERAGE).unwrap();
/// let scorer = SimilarityScorer::new(&WeightSet::default(), ConstraintSet::default());
///
/// let twin = CandidateComp::builder(
///     "twin",
///     CompKind::Sale,
///     400_000.0,
///     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
/// )
/// .gla(1875.0)
/// .build()
/// .unwrap();
///
/// let breakdown = scorer.score(&subject, &twin);
/// assert!((breakdown.score - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    weights: NormalizedWeights,
    constraints: ConstraintSet,
}

impl SimilarityScorer {
    /// Creates a scorer from raw weights and constraints.
    ///
    /// Weights are normalized here once; scoring then reuses the
    /// normalized set for every candidate.
    #[must_use]
    pub fn new(weights: &WeightSet, constraints: ConstraintSet) -> Self {
        Self {
            weights: weights.normalized(),
            constraints,
        }
    }

    /// Scores one candidate against the subject.
    #[must_use]
    pub fn score(&self, subject: &Subject, candidate: &CandidateComp) -> ScoreBreakdown {
        let factors: Vec<FactorScore> = self
            .weights
            .entries()
            .map(|(factor, weight)| {
                let similarity = self.similarity(factor, subject, candidate);
                FactorScore::new(factor, similarity, weight)
            })
            .collect();
        let score = factors.iter().map(|f| f.contribution).sum();
        ScoreBreakdown { factors, score }
    }

    fn similarity(&self, factor: Factor, subject: &Subject, candidate: &CandidateComp) -> f64 {
        match factor {
            Factor::Distance => {
                1.0 - clamp01(candidate.distance_miles() / self.constraints.distance_cap_miles())
            }
            Factor::Recency => {
                1.0 - clamp01(candidate.months_since_sale() as f64 / RECENCY_HORIZON_MONTHS)
            }
            Factor::Gla => match candidate.gla() {
                Some(gla) => {
                    let tolerance =
                        subject.gla() * self.constraints.gla_tolerance_pct() / 100.0;
                    1.0 - clamp01((gla - subject.gla()).abs() / tolerance)
                }
                // No reported living area: maximally dissimilar, visible
                // in the breakdown rather than silently neutral.
                None => 0.0,
            },
            Factor::Quality => {
                1.0 - clamp01(candidate.quality().diff(subject.quality()) as f64 / RATING_SPAN)
            }
            Factor::Condition => {
                1.0 - clamp01(
                    candidate.condition().diff(subject.condition()) as f64 / RATING_SPAN,
                )
            }
            Factor::Location => {
                if candidate.in_polygon() {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CompKind, Rating};
    use chrono::NaiveDate;

    fn subject() -> Subject {
        Subject::new(1875.0, Rating::AVERAGE, Rating::AVERAGE).unwrap()
    }

    fn candidate() -> crate::domain::entities::candidate::CandidateBuilder {
        CandidateComp::builder(
            "c1",
            CompKind::Sale,
            400_000.0,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        )
    }

    fn scorer(constraints: ConstraintSet) -> SimilarityScorer {
        SimilarityScorer::new(&WeightSet::default(), constraints)
    }

    fn factor_similarity(breakdown: &ScoreBreakdown, factor: Factor) -> f64 {
        breakdown
            .factors
            .iter()
            .find(|f| f.factor == factor)
            .map(|f| f.similarity)
            .unwrap()
    }

    #[test]
    fn identical_gla_scores_one() {
        let constraints = ConstraintSet::new(10.0, 1.0).unwrap();
        let comp = candidate().gla(1875.0).build().unwrap();
        let breakdown = scorer(constraints).score(&subject(), &comp);
        assert_eq!(factor_similarity(&breakdown, Factor::Gla), 1.0);
    }

    #[test]
    fn gla_at_tolerance_edge_scores_zero() {
        // 10 % of 1875 is 187.5; a comp 187.5 sqft larger is at the edge.
        let constraints = ConstraintSet::new(10.0, 1.0).unwrap();
        let comp = candidate().gla(1875.0 + 187.5).build().unwrap();
        let breakdown = scorer(constraints).score(&subject(), &comp);
        assert!(factor_similarity(&breakdown, Factor::Gla).abs() < 1e-9);
    }

    #[test]
    fn missing_gla_scores_zero() {
        let comp = candidate().build().unwrap();
        let breakdown = scorer(ConstraintSet::default()).score(&subject(), &comp);
        assert_eq!(factor_similarity(&breakdown, Factor::Gla), 0.0);
    }

    #[test]
    fn distance_beyond_cap_clamps_to_zero() {
        let constraints = ConstraintSet::new(10.0, 0.5).unwrap();
        let comp = candidate().gla(1875.0).distance_miles(1.0).build().unwrap();
        let breakdown = scorer(constraints).score(&subject(), &comp);
        assert_eq!(factor_similarity(&breakdown, Factor::Distance), 0.0);
    }

    #[test]
    fn distance_at_half_cap_scores_half() {
        let constraints = ConstraintSet::new(10.0, 1.0).unwrap();
        let comp = candidate().gla(1875.0).distance_miles(0.5).build().unwrap();
        let breakdown = scorer(constraints).score(&subject(), &comp);
        assert!((factor_similarity(&breakdown, Factor::Distance) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn recency_decays_over_twelve_months() {
        let comp = candidate().gla(1875.0).months_since_sale(6).build().unwrap();
        let breakdown = scorer(ConstraintSet::default()).score(&subject(), &comp);
        assert!((factor_similarity(&breakdown, Factor::Recency) - 0.5).abs() < 1e-9);

        let stale = candidate()
            .gla(1875.0)
            .months_since_sale(24)
            .build()
            .unwrap();
        let breakdown = scorer(ConstraintSet::default()).score(&subject(), &stale);
        assert_eq!(factor_similarity(&breakdown, Factor::Recency), 0.0);
    }

    #[test]
    fn rating_span_normalizes_quality_and_condition() {
        let comp = candidate()
            .gla(1875.0)
            .quality(Rating::new(1).unwrap())
            .condition(Rating::new(5).unwrap())
            .build()
            .unwrap();
        let breakdown = scorer(ConstraintSet::default()).score(&subject(), &comp);
        // Subject is 3/3; both diffs are 2 of a possible 4.
        assert!((factor_similarity(&breakdown, Factor::Quality) - 0.5).abs() < 1e-9);
        assert!((factor_similarity(&breakdown, Factor::Condition) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn score_equals_contribution_sum() {
        let comp = candidate()
            .gla(1700.0)
            .distance_miles(0.3)
            .months_since_sale(4)
            .build()
            .unwrap();
        let breakdown = scorer(ConstraintSet::default()).score(&subject(), &comp);
        let sum: f64 = breakdown.factors.iter().map(|f| f.contribution).sum();
        assert_eq!(breakdown.score, sum);
    }

    #[test]
    fn location_factor_only_with_location_weight() {
        let weights = WeightSet::default();
        let no_location = SimilarityScorer::new(&weights, ConstraintSet::default());
        let comp = candidate().gla(1875.0).in_polygon(true).build().unwrap();
        let breakdown = no_location.score(&subject(), &comp);
        assert!(!breakdown.factors.iter().any(|f| f.factor == Factor::Location));

        let weights = WeightSet::default().with_location(2.0).unwrap();
        let with_location = SimilarityScorer::new(&weights, ConstraintSet::default());
        let breakdown = with_location.score(&subject(), &comp);
        assert_eq!(factor_similarity(&breakdown, Factor::Location), 1.0);
    }

    #[test]
    fn zero_weights_still_produce_a_score() {
        let weights = WeightSet::new(0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let zero_scorer = SimilarityScorer::new(&weights, ConstraintSet::default());
        let comp = candidate().gla(1875.0).build().unwrap();
        let breakdown = zero_scorer.score(&subject(), &comp);
        assert!(breakdown.score.is_finite());
        let weight_sum: f64 = breakdown.factors.iter().map(|f| f.weight).sum();
        assert!((weight_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn display_score_rounds() {
        let breakdown = ScoreBreakdown {
            factors: vec![],
            score: 0.8749,
        };
        assert!((breakdown.display_score() - 0.87).abs() < 1e-12);
    }
}
