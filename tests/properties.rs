#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

//! Algebraic properties of the engine, checked over generated inputs.

use chrono::NaiveDate;
use comp_select::application::services::hilo_selection::SelectionEngine;
use comp_select::application::services::market_trend::TrendEstimator;
use comp_select::application::services::similarity::SimilarityScorer;
use comp_select::application::services::time_adjustment::{adjustment_factor, months_between};
use comp_select::domain::entities::{CandidateComp, MarketRecord, Subject};
use comp_select::domain::value_objects::{
    CompKind, ConstraintSet, HiLoRange, HiLoSettings, Rating, ValueBasis, WeightSet,
};
use proptest::prelude::*;

/// Everything that varies about a generated candidate except its id; ids
/// are assigned positionally so they are unique within a generated pool.
type CandidateParams = (
    CompKind,
    f64,
    NaiveDate,
    Option<f64>,
    f64,
    u32,
    Rating,
    Rating,
    bool,
);

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2015i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_weight() -> impl Strategy<Value = f64> {
    0.0f64..=10.0
}

fn arb_rating() -> impl Strategy<Value = Rating> {
    (1u8..=5).prop_map(|r| Rating::new(r).unwrap())
}

fn arb_candidate_params() -> impl Strategy<Value = CandidateParams> {
    (
        prop_oneof![Just(CompKind::Sale), Just(CompKind::Listing)],
        50_000.0f64..2_000_000.0,
        arb_date(),
        prop::option::of(600.0f64..6000.0),
        0.0f64..8.0,
        0u32..36,
        arb_rating(),
        arb_rating(),
        any::<bool>(),
    )
}

fn build_candidate(id: String, params: &CandidateParams) -> CandidateComp {
    let (kind, price, sale_date, gla, distance, months, quality, condition, in_polygon) = *params;
    let mut builder = CandidateComp::builder(id, kind, price, sale_date)
        .distance_miles(distance)
        .months_since_sale(months)
        .quality(quality)
        .condition(condition)
        .in_polygon(in_polygon);
    if let Some(gla) = gla {
        builder = builder.gla(gla);
    }
    builder.build().unwrap()
}

fn build_pool(params: &[CandidateParams]) -> Vec<CandidateComp> {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| build_candidate(format!("c{i:03}"), p))
        .collect()
}

proptest! {
    #[test]
    fn normalized_weights_sum_to_one(
        d in arb_weight(),
        r in arb_weight(),
        g in arb_weight(),
        q in arb_weight(),
        c in arb_weight(),
        location in prop::option::of(arb_weight()),
    ) {
        let mut weights = WeightSet::new(d, r, g, q, c).unwrap();
        if let Some(l) = location {
            weights = weights.with_location(l).unwrap();
        }
        let sum: f64 = weights.normalized().entries().map(|(_, w)| w).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn months_between_is_never_negative(a in arb_date(), b in arb_date()) {
        // The u32 return type makes negativity structural; the call must
        // also never panic, and at least one direction is a clamped zero.
        let forward = months_between(a, b);
        let backward = months_between(b, a);
        prop_assert!(forward == 0 || backward == 0);
    }

    #[test]
    fn zero_rate_never_changes_value(months in 0u32..600) {
        prop_assert_eq!(adjustment_factor(0.0, months), 1.0);
    }

    #[test]
    fn score_is_bounded_and_explainable(
        params in arb_candidate_params(),
        subject_gla in 800.0f64..5000.0,
        quality in arb_rating(),
        condition in arb_rating(),
    ) {
        let candidate = build_candidate("c000".to_string(), &params);
        let subject = Subject::new(subject_gla, quality, condition).unwrap();
        let scorer = SimilarityScorer::new(&WeightSet::default(), ConstraintSet::default());
        let breakdown = scorer.score(&subject, &candidate);

        prop_assert!((0.0..=1.0 + 1e-12).contains(&breakdown.score));
        let sum: f64 = breakdown.factors.iter().map(|f| f.contribution).sum();
        prop_assert!((breakdown.score - sum).abs() < 1e-9);
        for factor in &breakdown.factors {
            prop_assert!((0.0..=1.0).contains(&factor.similarity));
        }
    }

    #[test]
    fn selection_is_deterministic(
        params in prop::collection::vec(arb_candidate_params(), 1..40),
        box_pct in 5.0f64..=20.0,
    ) {
        let candidates = build_pool(&params);
        let subject = Subject::new(2000.0, Rating::AVERAGE, Rating::AVERAGE).unwrap();
        let engine = SelectionEngine::new(
            &WeightSet::default(),
            ConstraintSet::default(),
            HiLoSettings::new(ValueBasis::SalePrice, box_pct),
        );
        let effective = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let first = engine.select(&subject, &candidates, 0.005, effective).unwrap();
        let second = engine.select(&subject, &candidates, 0.005, effective).unwrap();
        prop_assert_eq!(&first, &second);

        // Ranked order is strictly sorted: score descending, unique id
        // ascending on ties.
        for pair in first.ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.score > b.score || (a.score == b.score && a.id < b.id),
                "unsorted pair: {} {}", a.id, b.id
            );
        }

        // Selected candidates are always inside the box.
        for id in first.selected_sales.iter().chain(&first.selected_listings) {
            let ranked = first.ranked.iter().find(|r| &r.id == id).unwrap();
            prop_assert!(ranked.inside_box);
        }

        // Primaries are prefixes of the selected lists, never padded.
        prop_assert!(first.primaries.len() <= 3);
        prop_assert!(first.listing_primaries.len() <= 2);
        prop_assert_eq!(
            first.primaries.as_slice(),
            &first.selected_sales[..first.primaries.len()]
        );
    }

    #[test]
    fn hilo_box_brackets_center(
        center in 10_000.0f64..5_000_000.0,
        box_pct in 5.0f64..=20.0,
    ) {
        let effective = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let range = HiLoRange::around(center, box_pct, effective, ValueBasis::SalePrice);
        prop_assert!(range.lo() <= center && center <= range.hi());
        prop_assert!(range.contains(center));
        prop_assert!(range.contains(range.lo()));
        prop_assert!(range.contains(range.hi()));
    }

    #[test]
    fn trend_estimator_is_total_and_finite(
        prices in prop::collection::vec(50_000.0f64..2_000_000.0, 0..60),
        lookback in 1u32..24,
        min_sales in 1usize..6,
    ) {
        let as_of = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let records: Vec<MarketRecord> = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                let month = 1 + (i % 12) as u32;
                let day = 1 + (i % 28) as u32;
                let close = NaiveDate::from_ymd_opt(2025, month, day).unwrap();
                MarketRecord::sold(price, Some(1800.0), close).unwrap()
            })
            .collect();

        for metric in [ValueBasis::SalePrice, ValueBasis::Ppsf] {
            let trend = TrendEstimator::new(lookback, metric)
                .with_min_sales_per_month(min_sales)
                .estimate(&records, as_of);
            prop_assert!(trend.pct_per_month.is_finite());
            prop_assert!(trend.pct_per_month > -1.0);
            // The IQR filter can never consume a whole month, so every
            // record is either used or counted as a discarded outlier.
            prop_assert!(trend.records_used + trend.outliers_discarded <= records.len());
        }
    }
}
