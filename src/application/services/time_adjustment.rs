//! # Time-Adjustment Calculator
//!
//! Converts a historical sale price to an equivalent value at the
//! appraisal's effective date, given a monthly trend rate.
//!
//! Pure functions of their inputs; no I/O. A sale that postdates the
//! effective date contributes zero months of adjustment — the engine never
//! extrapolates backward.

use crate::domain::entities::CandidateComp;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::ValueBasis;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A time-adjusted value with the factor and month count that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedValue {
    /// Dollar value at the effective date.
    pub value: f64,
    /// Compounded adjustment factor applied to the raw price.
    pub factor: f64,
    /// Whole months of adjustment applied.
    pub months: u32,
}

/// Whole-month difference between a sale date and the effective date,
/// clamped to zero when the sale postdates the effective date.
///
/// The difference counts completed calendar months: one month is subtracted
/// when the effective day-of-month precedes the sale day-of-month.
///
/// # Examples
///
/// ```
/// use comp_select::application::services::time_adjustment::months_between;
/// use chrono::NaiveDate;
///
/// let sale = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let effective = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
/// assert_eq!(months_between(sale, effective), 3);
///
/// // Not yet a full month.
/// let effective = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
/// assert_eq!(months_between(sale, effective), 0);
///
/// // Future sales never adjust backward.
/// let effective = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(months_between(sale, effective), 0);
/// ```
#[must_use]
pub fn months_between(sale_date: NaiveDate, effective_date: NaiveDate) -> u32 {
    let mut months = (effective_date.year() - sale_date.year()) * 12
        + (effective_date.month() as i32 - sale_date.month() as i32);
    if effective_date.day() < sale_date.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Compounded adjustment factor for a monthly rate over a month count.
///
/// `adjustment_factor(0.0, n) == 1.0` for every `n`: a zero trend leaves the
/// price unchanged. Negative rates (declining markets) are valid.
#[must_use]
pub fn adjustment_factor(pct_per_month: f64, months: u32) -> f64 {
    (1.0 + pct_per_month).powi(months as i32)
}

/// Adjusts a sale price to the effective date under the given basis.
///
/// Under [`ValueBasis::SalePrice`] the factor applies to the raw price.
/// Under [`ValueBasis::Ppsf`] the price is converted to price-per-area,
/// adjusted, and reconverted; a missing or non-positive GLA is a
/// [`DomainError::MissingArea`] — never a silent fallback to the
/// sale-price basis.
///
/// # Errors
///
/// - [`DomainError::InvalidPrice`] for a non-positive sale price.
/// - [`DomainError::MissingArea`] under the `ppsf` basis without a usable
///   living area; `id` names the offending record for the caller's
///   exclusion accounting.
pub fn adjust_value(
    id: &str,
    sale_price: f64,
    sale_date: NaiveDate,
    gla: Option<f64>,
    effective_date: NaiveDate,
    pct_per_month: f64,
    basis: ValueBasis,
) -> DomainResult<AdjustedValue> {
    if !sale_price.is_finite() || sale_price <= 0.0 {
        return Err(DomainError::InvalidPrice(sale_price));
    }

    let months = months_between(sale_date, effective_date);
    let factor = adjustment_factor(pct_per_month, months);

    let value = match basis {
        ValueBasis::SalePrice => sale_price * factor,
        ValueBasis::Ppsf => {
            let area = match gla {
                Some(a) if a.is_finite() && a > 0.0 => a,
                _ => return Err(DomainError::missing_area(id)),
            };
            let ppsf = sale_price / area;
            ppsf * factor * area
        }
    };

    Ok(AdjustedValue {
        value,
        factor,
        months,
    })
}

/// Adjusts a candidate comparable to the effective date.
///
/// # Errors
///
/// See [`adjust_value`].
pub fn adjust_candidate(
    candidate: &CandidateComp,
    effective_date: NaiveDate,
    pct_per_month: f64,
    basis: ValueBasis,
) -> DomainResult<AdjustedValue> {
    adjust_value(
        candidate.id().as_str(),
        candidate.sale_price(),
        candidate.sale_date(),
        candidate.gla(),
        effective_date,
        pct_per_month,
        basis,
    )
}
