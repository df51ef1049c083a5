//! # Market Trend Estimator
//!
//! Fits a monthly market trend from dated sale records.
//!
//! The pipeline: filter sold records in the lookback window, bucket them by
//! calendar month, drop per-month outliers with an IQR band, take monthly
//! medians, then fit a line through the log medians. Theil-Sen is the
//! primary estimator; ordinary least squares is the documented degraded
//! mode when too few months carry a usable sample. Fewer than two month
//! points yields the zero trend — a flat market is the safe default when
//! data is insufficient.

use crate::domain::entities::MarketRecord;
use crate::domain::value_objects::{TrendMethod, TrendResult, ValueBasis};
use crate::math::{ols, theil_sen};
use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

/// Months that must reach `min_sales_per_month` for the robust estimator.
const ROBUST_MIN_MONTHS: usize = 6;

/// Minimum per-month sample size for IQR filtering; quartiles on smaller
/// samples are unstable, so those months skip filtering.
const IQR_MIN_SAMPLES: usize = 4;

/// IQR band multiplier.
const IQR_MULTIPLIER: f64 = 1.5;

/// Default minimum sales per month for the estimator-choice gate.
const DEFAULT_MIN_SALES_PER_MONTH: usize = 3;

/// Estimates a percent-per-month market trend from sale records.
///
/// # Examples
///
/// ```
/// use comp_select::application::services::market_trend::TrendEstimator;
/// use comp_select::domain::entities::MarketRecord;
/// use comp_select::domain::value_objects::ValueBasis;
/// use chrono::NaiveDate;
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// let records: Vec<MarketRecord> = (0..5)
///     .map(|m| {
///         let close = NaiveDate::from_ymd_opt(2025, 1 + m, 10).unwrap();
///         MarketRecord::sold(400_000.0, Some(2000.0), close).unwrap()
///     })
///     .collect();
///
/// let estimator = TrendEstimator::new(12, ValueBasis::SalePrice)
///     .with_min_sales_per_month(1);
/// let trend = estimator.estimate(&records, as_of);
/// assert!(trend.pct_per_month.abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct TrendEstimator {
    lookback_months: u32,
    metric: ValueBasis,
    min_sales_per_month: usize,
}

impl TrendEstimator {
    /// Creates an estimator over the given lookback window and metric.
    #[must_use]
    pub fn new(lookback_months: u32, metric: ValueBasis) -> Self {
        Self {
            lookback_months: lookback_months.max(1),
            metric,
            min_sales_per_month: DEFAULT_MIN_SALES_PER_MONTH,
        }
    }

    /// Sets the minimum per-month sample size that gates the choice of
    /// estimator (Theil-Sen needs enough well-populated months).
    #[must_use]
    pub fn with_min_sales_per_month(mut self, min: usize) -> Self {
        self.min_sales_per_month = min;
        self
    }

    /// Returns the lookback window in months.
    #[must_use]
    pub const fn lookback_months(&self) -> u32 {
        self.lookback_months
    }

    /// Returns the metric being trended.
    #[must_use]
    pub const fn metric(&self) -> ValueBasis {
        self.metric
    }

    /// Estimates the trend from the given records, anchored at `as_of`.
    ///
    /// The window covers `lookback_months` calendar months ending with the
    /// month of `as_of`; records closing after `as_of` are outside it.
    #[must_use]
    pub fn estimate(&self, records: &[MarketRecord], as_of: NaiveDate) -> TrendResult {
        let lookback = self.lookback_months as usize;
        let start_month = month_ordinal(as_of) - (lookback as i32 - 1);

        // One bucket per calendar month in the window, empty months included.
        let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); lookback];
        for record in records {
            if !record.status().is_sold() {
                continue;
            }
            let (Some(close), Some(price), Some(area)) = (
                record.close_date(),
                record.sale_price(),
                record.living_area(),
            ) else {
                continue;
            };
            if close > as_of || price <= 0.0 || area <= 0.0 {
                continue;
            }
            let idx = month_ordinal(close) - start_month;
            if idx < 0 {
                continue;
            }
            let value = match self.metric {
                ValueBasis::SalePrice => price,
                ValueBasis::Ppsf => price / area,
            };
            if let Some(bucket) = buckets.get_mut(idx as usize) {
                bucket.push(value);
            }
        }

        let mut outliers_discarded = 0;
        let mut records_used = 0;
        let mut qualified_months = 0;
        let mut points: Vec<(f64, f64)> = Vec::new();

        for (idx, bucket) in buckets.iter_mut().enumerate() {
            if bucket.len() >= IQR_MIN_SAMPLES {
                outliers_discarded += iqr_filter(bucket);
            }
            if bucket.is_empty() {
                continue;
            }
            records_used += bucket.len();
            if bucket.len() >= self.min_sales_per_month {
                qualified_months += 1;
            }
            if let Some(median) = crate::math::median(bucket) {
                points.push((idx as f64, median.ln()));
            }
        }

        if points.len() < 2 {
            warn!(
                months_used = points.len(),
                records_used, "insufficient trend data; returning zero trend"
            );
            return TrendResult::insufficient(points.len(), records_used, outliers_discarded);
        }

        let (fit, method) = if qualified_months >= ROBUST_MIN_MONTHS {
            (theil_sen(&points), TrendMethod::TheilSen)
        } else {
            debug!(
                qualified_months,
                min_sales_per_month = self.min_sales_per_month,
                "too few well-populated months for Theil-Sen; using OLS"
            );
            (ols(&points), TrendMethod::Ols)
        };

        match fit {
            Some(line) => TrendResult::fitted(
                line.slope,
                line.intercept,
                method,
                points.len(),
                records_used,
                outliers_discarded,
            ),
            None => {
                warn!("trend fit degenerate; returning zero trend");
                TrendResult::insufficient(points.len(), records_used, outliers_discarded)
            }
        }
    }
}

/// Calendar-month ordinal (year * 12 + zero-based month).
fn month_ordinal(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Drops values outside the IQR band, returning the discard count.
///
/// Both bounds anchor at Q1: `[Q1 - 1.5*IQR, Q1 + 1.5*IQR]`. Q3 = Q1 + IQR
/// always lies inside the band, so the month's median survives and the
/// filter can never empty a sample.
fn iqr_filter(values: &mut Vec<f64>) -> usize {
    let Some((q1, q3)) = crate::math::quartiles(values) else {
        return 0;
    };
    let iqr = q3 - q1;
    let lo = q1 - IQR_MULTIPLIER * iqr;
    let hi = q1 + IQR_MULTIPLIER * iqr;
    let before = values.len();
    values.retain(|v| (lo..=hi).contains(v));
    before - values.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sold(price: f64, close: NaiveDate) -> MarketRecord {
        MarketRecord::sold(price, Some(2000.0), close).unwrap()
    }

    #[test]
    fn flat_market_yields_zero_rate() {
        let records: Vec<MarketRecord> = (1..=5)
            .map(|m| sold(400_000.0, date(2025, m, 10)))
            .collect();
        let estimator =
            TrendEstimator::new(12, ValueBasis::SalePrice).with_min_sales_per_month(1);
        let trend = estimator.estimate(&records, date(2025, 6, 15));
        assert!(trend.pct_per_month.abs() < 1e-6);
        assert_eq!(trend.months_used, 5);
    }

    #[test]
    fn robust_path_recovers_exact_monthly_rate() {
        // Six months, three identical sales each, growing 1 % per month.
        let mut records = Vec::new();
        for m in 1..=6u32 {
            let price = 400_000.0 * 1.01f64.powi(m as i32 - 1);
            for d in [5, 15, 25] {
                records.push(sold(price, date(2025, m, d)));
            }
        }
        let estimator =
            TrendEstimator::new(6, ValueBasis::SalePrice).with_min_sales_per_month(3);
        let trend = estimator.estimate(&records, date(2025, 6, 30));
        assert_eq!(trend.method, TrendMethod::TheilSen);
        assert!((trend.pct_per_month - 0.01).abs() < 1e-9, "{trend}");
    }

    #[test]
    fn sparse_months_fall_back_to_ols() {
        let records: Vec<MarketRecord> = (1..=5)
            .map(|m| {
                let price = 300_000.0 * 1.02f64.powi(m as i32 - 1);
                sold(price, date(2025, m, 10))
            })
            .collect();
        let estimator =
            TrendEstimator::new(12, ValueBasis::SalePrice).with_min_sales_per_month(3);
        let trend = estimator.estimate(&records, date(2025, 5, 31));
        assert_eq!(trend.method, TrendMethod::Ols);
        assert!((trend.pct_per_month - 0.02).abs() < 1e-9);
        assert!(trend.is_low_confidence());
    }

    #[test]
    fn fewer_than_two_months_is_zero_trend() {
        let records = vec![sold(400_000.0, date(2025, 5, 1))];
        let estimator = TrendEstimator::new(12, ValueBasis::SalePrice);
        let trend = estimator.estimate(&records, date(2025, 6, 1));
        assert_eq!(trend.method, TrendMethod::Insufficient);
        assert_eq!(trend.pct_per_month, 0.0);
        assert_eq!(trend.months_used, 1);
    }

    #[test]
    fn empty_records_is_zero_trend() {
        let estimator = TrendEstimator::new(12, ValueBasis::SalePrice);
        let trend = estimator.estimate(&[], date(2025, 6, 1));
        assert_eq!(trend.method, TrendMethod::Insufficient);
        assert_eq!(trend.records_used, 0);
    }

    #[test]
    fn records_outside_window_are_ignored() {
        let mut records: Vec<MarketRecord> = (4..=5)
            .map(|m| sold(400_000.0, date(2025, m, 10)))
            .collect();
        // Too old and in the future; both outside the 3-month window.
        records.push(sold(100_000.0, date(2024, 1, 10)));
        records.push(sold(900_000.0, date(2025, 7, 10)));

        let estimator =
            TrendEstimator::new(3, ValueBasis::SalePrice).with_min_sales_per_month(1);
        let trend = estimator.estimate(&records, date(2025, 6, 15));
        assert_eq!(trend.records_used, 2);
        assert!(trend.pct_per_month.abs() < 1e-9);
    }

    #[test]
    fn non_sold_and_area_less_records_are_ignored() {
        let mut records = vec![
            MarketRecord::listing(500_000.0, Some(2000.0), date(2025, 4, 1)).unwrap(),
            MarketRecord::sold(400_000.0, None, date(2025, 4, 10)).unwrap(),
        ];
        records.push(sold(400_000.0, date(2025, 5, 10)));
        let estimator =
            TrendEstimator::new(12, ValueBasis::SalePrice).with_min_sales_per_month(1);
        let trend = estimator.estimate(&records, date(2025, 6, 1));
        assert_eq!(trend.records_used, 1);
        assert_eq!(trend.method, TrendMethod::Insufficient);
    }

    #[test]
    fn ppsf_metric_divides_by_area() {
        // Same price, halving area doubles the ppsf metric; a flat-price
        // market still trends flat when areas are constant.
        let records: Vec<MarketRecord> = (1..=4)
            .map(|m| sold(450_000.0, date(2025, m, 10)))
            .collect();
        let estimator =
            TrendEstimator::new(12, ValueBasis::Ppsf).with_min_sales_per_month(1);
        let trend = estimator.estimate(&records, date(2025, 4, 30));
        assert!(trend.pct_per_month.abs() < 1e-9);
    }

    #[test]
    fn outlier_month_value_is_discarded() {
        // March has three tight sales and one wild one; the wild value is
        // outside the IQR band and must not drag the median.
        let mut records = vec![
            sold(400_000.0, date(2025, 3, 3)),
            sold(402_000.0, date(2025, 3, 10)),
            sold(398_000.0, date(2025, 3, 17)),
            sold(1_200_000.0, date(2025, 3, 24)),
        ];
        records.push(sold(400_000.0, date(2025, 4, 10)));
        let estimator =
            TrendEstimator::new(12, ValueBasis::SalePrice).with_min_sales_per_month(1);
        let trend = estimator.estimate(&records, date(2025, 4, 30));
        assert_eq!(trend.outliers_discarded, 1);
        assert_eq!(trend.records_used, 4);
        // Median of March is ~400k either way; with the outlier gone the
        // two-month series is nearly flat.
        assert!(trend.pct_per_month.abs() < 1e-3);
    }

    #[test]
    fn small_months_skip_iqr_filtering() {
        // Three identical values: below the filter threshold, median is the
        // value unchanged and nothing is discarded.
        let records = vec![
            sold(500_000.0, date(2025, 3, 3)),
            sold(500_000.0, date(2025, 3, 13)),
            sold(500_000.0, date(2025, 3, 23)),
            sold(500_000.0, date(2025, 4, 10)),
        ];
        let estimator =
            TrendEstimator::new(12, ValueBasis::SalePrice).with_min_sales_per_month(1);
        let trend = estimator.estimate(&records, date(2025, 4, 30));
        assert_eq!(trend.outliers_discarded, 0);
        assert!(trend.pct_per_month.abs() < 1e-9);
    }

    #[test]
    fn iqr_filter_keeps_at_least_the_median() {
        let mut values = vec![1.0, 1.0, 1.0, 1.0, 2000.0];
        let discarded = iqr_filter(&mut values);
        assert_eq!(discarded, 1);
        assert_eq!(values, vec![1.0, 1.0, 1.0, 1.0]);
    }
}
