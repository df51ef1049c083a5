//! # Market Record
//!
//! One observed sale or listing, ingested from the upstream data source and
//! immutable for the duration of a trend computation.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::RecordStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observed market sale or listing.
///
/// Derived fields (`days_on_market`, `sp_to_lp`) are computed at
/// construction from the raw dates and prices — the trend estimator never
/// recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    status: RecordStatus,
    sale_price: Option<f64>,
    list_price: Option<f64>,
    living_area: Option<f64>,
    close_date: Option<NaiveDate>,
    list_date: Option<NaiveDate>,
    days_on_market: Option<u32>,
    sp_to_lp: Option<f64>,
}

impl MarketRecord {
    /// Creates a market record, validating status-dependent requirements.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MissingSalePrice`] for a `sold` record without a
    ///   sale price.
    /// - [`DomainError::InvalidPrice`] for a non-positive sale or list
    ///   price.
    /// - [`DomainError::InvalidArea`] for a non-positive living area.
    pub fn new(
        status: RecordStatus,
        sale_price: Option<f64>,
        list_price: Option<f64>,
        living_area: Option<f64>,
        close_date: Option<NaiveDate>,
        list_date: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        if status.is_sold() && sale_price.is_none() {
            return Err(DomainError::MissingSalePrice);
        }
        for price in [sale_price, list_price].into_iter().flatten() {
            if !price.is_finite() || price <= 0.0 {
                return Err(DomainError::InvalidPrice(price));
            }
        }
        if let Some(area) = living_area {
            if !area.is_finite() || area <= 0.0 {
                return Err(DomainError::InvalidArea(area));
            }
        }

        let days_on_market = match (list_date, close_date) {
            (Some(list), Some(close)) if close >= list => {
                Some((close - list).num_days() as u32)
            }
            _ => None,
        };
        let sp_to_lp = match (sale_price, list_price) {
            (Some(sp), Some(lp)) => Some(sp / lp),
            _ => None,
        };

        Ok(Self {
            status,
            sale_price,
            list_price,
            living_area,
            close_date,
            list_date,
            days_on_market,
            sp_to_lp,
        })
    }

    /// Convenience constructor for a closed sale.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the price or living area is invalid.
    pub fn sold(
        sale_price: f64,
        living_area: Option<f64>,
        close_date: NaiveDate,
    ) -> DomainResult<Self> {
        Self::new(
            RecordStatus::Sold,
            Some(sale_price),
            None,
            living_area,
            Some(close_date),
            None,
        )
    }

    /// Convenience constructor for an active listing.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the price or living area is invalid.
    pub fn listing(
        list_price: f64,
        living_area: Option<f64>,
        list_date: NaiveDate,
    ) -> DomainResult<Self> {
        Self::new(
            RecordStatus::Active,
            None,
            Some(list_price),
            living_area,
            None,
            Some(list_date),
        )
    }

    /// Returns the record status.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> RecordStatus {
        self.status
    }

    /// Returns the sale price, present for sold records.
    #[inline]
    #[must_use]
    pub const fn sale_price(&self) -> Option<f64> {
        self.sale_price
    }

    /// Returns the list price, if known.
    #[inline]
    #[must_use]
    pub const fn list_price(&self) -> Option<f64> {
        self.list_price
    }

    /// Returns the living area in square feet, if known.
    #[inline]
    #[must_use]
    pub const fn living_area(&self) -> Option<f64> {
        self.living_area
    }

    /// Returns the close date, if the record has closed.
    #[inline]
    #[must_use]
    pub const fn close_date(&self) -> Option<NaiveDate> {
        self.close_date
    }

    /// Returns the list date, if known.
    #[inline]
    #[must_use]
    pub const fn list_date(&self) -> Option<NaiveDate> {
        self.list_date
    }

    /// Returns days on market, derived from list and close dates.
    #[inline]
    #[must_use]
    pub const fn days_on_market(&self) -> Option<u32> {
        self.days_on_market
    }

    /// Returns the sale-price-to-list-price ratio, when both are known.
    #[inline]
    #[must_use]
    pub const fn sp_to_lp(&self) -> Option<f64> {
        self.sp_to_lp
    }
}
