#![allow(clippy::unwrap_used, missing_docs)]

//! Benchmarks the score-rank-select path over synthetic candidate pools.

use chrono::NaiveDate;
use comp_select::application::services::hilo_selection::SelectionEngine;
use comp_select::domain::entities::{CandidateComp, Subject};
use comp_select::domain::value_objects::{
    CompKind, ConstraintSet, HiLoSettings, Rating, ValueBasis, WeightSet,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn pool(size: usize) -> Vec<CandidateComp> {
    let base = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    (0..size)
        .map(|i| {
            let sale_date = base + chrono::Days::new((i % 360) as u64);
            CandidateComp::builder(
                format!("mls-{i:05}"),
                if i % 4 == 0 {
                    CompKind::Listing
                } else {
                    CompKind::Sale
                },
                300_000.0 + (i % 97) as f64 * 2_500.0,
                sale_date,
            )
            .gla(1_400.0 + (i % 53) as f64 * 25.0)
            .distance_miles((i % 19) as f64 * 0.25)
            .months_since_sale((i % 14) as u32)
            .quality(Rating::new(1 + (i % 5) as u8).unwrap())
            .condition(Rating::new(1 + (i % 3) as u8).unwrap())
            .in_polygon(i % 3 != 0)
            .build()
            .unwrap()
        })
        .collect()
}

fn bench_selection(c: &mut Criterion) {
    let subject = Subject::new(1_900.0, Rating::AVERAGE, Rating::AVERAGE).unwrap();
    let engine = SelectionEngine::new(
        &WeightSet::default(),
        ConstraintSet::default(),
        HiLoSettings::new(ValueBasis::SalePrice, 10.0),
    );
    let effective = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let mut group = c.benchmark_group("hilo_selection");
    for size in [100, 500, 2_000] {
        let candidates = pool(size);
        group.bench_function(format!("select_{size}"), |b| {
            b.iter(|| {
                engine
                    .select(
                        black_box(&subject),
                        black_box(&candidates),
                        black_box(0.008),
                        effective,
                    )
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_selection);
criterion_main!(benches);
