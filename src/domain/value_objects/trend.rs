//! # Trend Result
//!
//! Output of the market trend estimator.

use crate::domain::value_objects::enums::TrendMethod;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fitted market time trend.
///
/// `slope` and `intercept` describe the log-median regression line;
/// `pct_per_month` is the slope converted to a monthly rate
/// (`exp(slope) - 1`). The counters record how much data survived each
/// stage so reviewers can see when a trend rests on thin data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Slope of the log-median regression (log dollars per month).
    pub slope: f64,
    /// Intercept of the log-median regression.
    pub intercept: f64,
    /// Monthly percentage rate, as a fraction (0.01 = +1 %/month).
    pub pct_per_month: f64,
    /// Which estimator produced this result.
    pub method: TrendMethod,
    /// Number of months that contributed a median point.
    pub months_used: usize,
    /// Number of records that survived filtering into the medians.
    pub records_used: usize,
    /// Number of per-month values discarded by the IQR filter.
    pub outliers_discarded: usize,
}

impl TrendResult {
    /// Creates a fitted trend result.
    #[must_use]
    pub fn fitted(
        slope: f64,
        intercept: f64,
        method: TrendMethod,
        months_used: usize,
        records_used: usize,
        outliers_discarded: usize,
    ) -> Self {
        Self {
            slope,
            intercept,
            pct_per_month: slope.exp() - 1.0,
            method,
            months_used,
            records_used,
            outliers_discarded,
        }
    }

    /// Creates the zero trend returned when fewer than two usable month
    /// points exist. A flat market is the safe default for insufficient data.
    #[must_use]
    pub fn insufficient(months_used: usize, records_used: usize, outliers_discarded: usize) -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            pct_per_month: 0.0,
            method: TrendMethod::Insufficient,
            months_used,
            records_used,
            outliers_discarded,
        }
    }

    /// Returns true if this trend came from the degraded or zero path.
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        !self.method.is_robust()
    }
}

impl fmt::Display for TrendResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrendResult({:+.4}%/mo, {}, {} months, {} records)",
            self.pct_per_month * 100.0,
            self.method,
            self.months_used,
            self.records_used
        )
    }
}
