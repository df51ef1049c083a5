//! # Hi-Lo Range Types
//!
//! The valuation box around a center value and the settings that drive the
//! selection engine.

use crate::domain::value_objects::enums::{CenterBasis, ValueBasis};
use crate::domain::value_objects::ids::CompId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The acceptable value range around a center value.
///
/// `lo = center x (1 - boxPct/100)` and `hi = center x (1 + boxPct/100)`;
/// containment is inclusive at both bounds.
///
/// # Examples
///
/// ```
/// use comp_select::domain::value_objects::enums::ValueBasis;
/// use comp_select::domain::value_objects::hilo::HiLoRange;
/// use chrono::NaiveDate;
///
/// let effective = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let range = HiLoRange::around(450_000.0, 10.0, effective, ValueBasis::SalePrice);
/// assert_eq!(range.lo(), 405_000.0);
/// assert_eq!(range.hi(), 495_000.0);
/// assert!(range.contains(405_000.0));
/// assert!(!range.contains(495_000.01));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiLoRange {
    center: f64,
    lo: f64,
    hi: f64,
    effective_date: NaiveDate,
    basis: ValueBasis,
}

impl HiLoRange {
    /// Builds the range around a center value with the given box percentage.
    #[must_use]
    pub fn around(
        center: f64,
        box_pct: f64,
        effective_date: NaiveDate,
        basis: ValueBasis,
    ) -> Self {
        // Scaled in percent space so round-number boxes come out exact:
        // 450_000 at 10 % yields precisely 405_000 and 495_000.
        Self {
            center,
            lo: center * (100.0 - box_pct) / 100.0,
            hi: center * (100.0 + box_pct) / 100.0,
            effective_date,
            basis,
        }
    }

    /// Returns true if the value lies inside the box (inclusive bounds).
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    /// Returns the center value.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> f64 {
        self.center
    }

    /// Returns the low bound.
    #[inline]
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Returns the high bound.
    #[inline]
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// Returns the effective date the box is anchored to.
    #[inline]
    #[must_use]
    pub const fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Returns the valuation basis of the box.
    #[inline]
    #[must_use]
    pub const fn basis(&self) -> ValueBasis {
        self.basis
    }
}

impl fmt::Display for HiLoRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HiLoRange({:.0} [{:.0}, {:.0}] {})",
            self.center, self.lo, self.hi, self.basis
        )
    }
}

/// Settings for a Hi-Lo selection run.
///
/// `box_pct` conventionally lies in `[5, 20]`; the bound is validated at the
/// configuration boundary, not re-enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiLoSettings {
    /// Valuation basis for time adjustment and the box itself.
    pub basis: ValueBasis,
    /// Half-width of the box as a percentage of the center.
    pub box_pct: f64,
    /// Maximum number of sale-type candidates to select.
    pub max_sales: usize,
    /// Maximum number of listing-type candidates to select.
    pub max_listings: usize,
    /// Restrict ranking to candidates inside the market polygon.
    pub inside_polygon_only: bool,
    /// How the center value is determined.
    pub center_basis: CenterBasis,
    /// Externally supplied center value, required for [`CenterBasis::Model`].
    pub model_value: Option<f64>,
    /// Existing primary comp ids, used by [`CenterBasis::WeightedPrimaries`].
    pub primary_ids: Vec<CompId>,
}

impl HiLoSettings {
    /// Conventional lower bound for `box_pct`.
    pub const BOX_PCT_MIN: f64 = 5.0;
    /// Conventional upper bound for `box_pct`.
    pub const BOX_PCT_MAX: f64 = 20.0;

    /// Creates settings with the given basis and box percentage.
    #[must_use]
    pub fn new(basis: ValueBasis, box_pct: f64) -> Self {
        Self {
            basis,
            box_pct,
            ..Self::default()
        }
    }

    /// Sets the maximum number of sales to select.
    #[must_use]
    pub fn with_max_sales(mut self, max: usize) -> Self {
        self.max_sales = max;
        self
    }

    /// Sets the maximum number of listings to select.
    #[must_use]
    pub fn with_max_listings(mut self, max: usize) -> Self {
        self.max_listings = max;
        self
    }

    /// Restricts ranking to polygon-contained candidates.
    #[must_use]
    pub fn with_inside_polygon_only(mut self, inside_only: bool) -> Self {
        self.inside_polygon_only = inside_only;
        self
    }

    /// Sets the center basis.
    #[must_use]
    pub fn with_center_basis(mut self, center_basis: CenterBasis) -> Self {
        self.center_basis = center_basis;
        self
    }

    /// Supplies the external model center value.
    #[must_use]
    pub fn with_model_value(mut self, value: f64) -> Self {
        self.model_value = Some(value);
        self
    }

    /// Supplies existing primary comp ids for the weighted-primaries center.
    #[must_use]
    pub fn with_primary_ids(mut self, ids: Vec<CompId>) -> Self {
        self.primary_ids = ids;
        self
    }
}

impl Default for HiLoSettings {
    /// Sale-price basis, 10 % box, up to 6 sales and 4 listings,
    /// median-of-time-adjusted center.
    fn default() -> Self {
        Self {
            basis: ValueBasis::SalePrice,
            box_pct: 10.0,
            max_sales: 6,
            max_listings: 4,
            inside_polygon_only: false,
            center_basis: CenterBasis::MedianTimeAdj,
            model_value: None,
            primary_ids: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ten_percent_box_around_450k() {
        let range = HiLoRange::around(450_000.0, 10.0, date(2025, 6, 1), ValueBasis::SalePrice);
        assert_eq!(range.lo(), 405_000.0);
        assert_eq!(range.hi(), 495_000.0);
        assert_eq!(range.center(), 450_000.0);
    }

    #[test]
    fn containment_is_inclusive() {
        let range = HiLoRange::around(100_000.0, 10.0, date(2025, 6, 1), ValueBasis::SalePrice);
        assert!(range.contains(90_000.0));
        assert!(range.contains(110_000.0));
        assert!(range.contains(100_000.0));
        assert!(!range.contains(89_999.99));
        assert!(!range.contains(110_000.01));
    }

    #[test]
    fn settings_builder_chain() {
        let settings = HiLoSettings::new(ValueBasis::Ppsf, 15.0)
            .with_max_sales(3)
            .with_max_listings(1)
            .with_inside_polygon_only(true)
            .with_center_basis(CenterBasis::Model)
            .with_model_value(250.0);

        assert_eq!(settings.basis, ValueBasis::Ppsf);
        assert_eq!(settings.box_pct, 15.0);
        assert_eq!(settings.max_sales, 3);
        assert_eq!(settings.max_listings, 1);
        assert!(settings.inside_polygon_only);
        assert_eq!(settings.center_basis, CenterBasis::Model);
        assert_eq!(settings.model_value, Some(250.0));
    }

    #[test]
    fn default_settings() {
        let settings = HiLoSettings::default();
        assert_eq!(settings.basis, ValueBasis::SalePrice);
        assert_eq!(settings.box_pct, 10.0);
        assert_eq!(settings.center_basis, CenterBasis::MedianTimeAdj);
        assert!(settings.primary_ids.is_empty());
    }
}
