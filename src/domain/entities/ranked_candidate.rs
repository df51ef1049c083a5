//! # Ranked Candidate
//!
//! The scored, time-adjusted form of a candidate with its per-factor
//! breakdown. Every composite score is reproducible from its breakdown:
//! `score == sum of contributions` exactly, because the score is computed
//! as that sum.

use crate::domain::value_objects::{CompId, CompKind, Factor};
use serde::{Deserialize, Serialize};

/// One factor's contribution to a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// The factor being scored.
    pub factor: Factor,
    /// Similarity in `[0, 1]`, 1 meaning identical to the subject.
    pub similarity: f64,
    /// Normalized weight applied to the similarity.
    pub weight: f64,
    /// `similarity x weight`.
    pub contribution: f64,
}

impl FactorScore {
    /// Creates a factor score from a similarity and its normalized weight.
    #[must_use]
    pub fn new(factor: Factor, similarity: f64, weight: f64) -> Self {
        Self {
            factor,
            similarity,
            weight,
            contribution: similarity * weight,
        }
    }
}

/// A candidate after time adjustment, scoring, and box classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// Candidate id.
    pub id: CompId,
    /// Sale or listing.
    pub kind: CompKind,
    /// True if the time-adjusted value lies inside the Hi-Lo box.
    pub inside_box: bool,
    /// True if the candidate lies inside the market polygon.
    pub in_polygon: bool,
    /// Sale price adjusted to the effective date.
    pub adjusted_value: f64,
    /// Composite similarity score in `[0, 1]`, full precision.
    pub score: f64,
    /// Per-factor audit breakdown; `score` equals the contribution sum.
    pub breakdown: Vec<FactorScore>,
}

impl RankedCandidate {
    /// Returns the score rounded to two decimal places for display.
    ///
    /// Ranking always uses the full-precision [`RankedCandidate::score`].
    #[must_use]
    pub fn display_score(&self) -> f64 {
        (self.score * 100.0).round() / 100.0
    }

    /// Returns the sum of the breakdown contributions.
    #[must_use]
    pub fn contribution_sum(&self) -> f64 {
        self.breakdown.iter().map(|f| f.contribution).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn factor_score_contribution() {
        let fs = FactorScore::new(Factor::Distance, 0.8, 0.25);
        assert!((fs.contribution - 0.2).abs() < 1e-12);
    }

    #[test]
    fn display_score_rounds_to_two_places() {
        let ranked = RankedCandidate {
            id: CompId::new("c1"),
            kind: CompKind::Sale,
            inside_box: true,
            in_polygon: false,
            adjusted_value: 400_000.0,
            score: 0.876_54,
            breakdown: vec![],
        };
        assert!((ranked.display_score() - 0.88).abs() < 1e-12);
        // Full precision retained for ranking.
        assert!((ranked.score - 0.876_54).abs() < 1e-12);
    }

    #[test]
    fn contribution_sum_matches_score_by_construction() {
        let breakdown = vec![
            FactorScore::new(Factor::Distance, 1.0, 0.4),
            FactorScore::new(Factor::Recency, 0.5, 0.6),
        ];
        let score: f64 = breakdown.iter().map(|f| f.contribution).sum();
        let ranked = RankedCandidate {
            id: CompId::new("c2"),
            kind: CompKind::Sale,
            inside_box: false,
            in_polygon: true,
            adjusted_value: 1.0,
            score,
            breakdown,
        };
        assert_eq!(ranked.score, ranked.contribution_sum());
    }
}
