//! # Candidate Comparable
//!
//! A market record adapted for scoring against the subject.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{CompId, CompKind, Rating};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A candidate comparable, ready for time adjustment and scoring.
///
/// Invariants: the sale price is positive and the distance to the subject is
/// non-negative; `months_since_sale` is non-negative by type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateComp {
    id: CompId,
    kind: CompKind,
    sale_price: f64,
    sale_date: NaiveDate,
    gla: Option<f64>,
    distance_miles: f64,
    months_since_sale: u32,
    quality: Rating,
    condition: Rating,
    in_polygon: bool,
}

impl CandidateComp {
    /// Starts a builder for a candidate comparable.
    ///
    /// For a listing, `sale_price` is the list price and `sale_date` the
    /// list date; the Hi-Lo engine treats both kinds uniformly.
    #[must_use]
    pub fn builder(
        id: impl Into<CompId>,
        kind: CompKind,
        sale_price: f64,
        sale_date: NaiveDate,
    ) -> CandidateBuilder {
        CandidateBuilder {
            id: id.into(),
            kind,
            sale_price,
            sale_date,
            gla: None,
            distance_miles: 0.0,
            months_since_sale: 0,
            quality: Rating::AVERAGE,
            condition: Rating::AVERAGE,
            in_polygon: false,
        }
    }

    /// Returns the candidate id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> &CompId {
        &self.id
    }

    /// Returns whether this is a sale or a listing.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> CompKind {
        self.kind
    }

    /// Returns the raw (unadjusted) sale or list price.
    #[inline]
    #[must_use]
    pub const fn sale_price(&self) -> f64 {
        self.sale_price
    }

    /// Returns the sale (or list) date.
    #[inline]
    #[must_use]
    pub const fn sale_date(&self) -> NaiveDate {
        self.sale_date
    }

    /// Returns the gross living area, if known.
    #[inline]
    #[must_use]
    pub const fn gla(&self) -> Option<f64> {
        self.gla
    }

    /// Returns the distance to the subject in miles.
    #[inline]
    #[must_use]
    pub const fn distance_miles(&self) -> f64 {
        self.distance_miles
    }

    /// Returns whole months elapsed since the sale.
    #[inline]
    #[must_use]
    pub const fn months_since_sale(&self) -> u32 {
        self.months_since_sale
    }

    /// Returns the quality rating.
    #[inline]
    #[must_use]
    pub const fn quality(&self) -> Rating {
        self.quality
    }

    /// Returns the condition rating.
    #[inline]
    #[must_use]
    pub const fn condition(&self) -> Rating {
        self.condition
    }

    /// Returns true if the candidate lies inside the market polygon.
    #[inline]
    #[must_use]
    pub const fn in_polygon(&self) -> bool {
        self.in_polygon
    }
}

/// Builder for [`CandidateComp`].
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    id: CompId,
    kind: CompKind,
    sale_price: f64,
    sale_date: NaiveDate,
    gla: Option<f64>,
    distance_miles: f64,
    months_since_sale: u32,
    quality: Rating,
    condition: Rating,
    in_polygon: bool,
}

impl CandidateBuilder {
    /// Sets the gross living area.
    #[must_use]
    pub fn gla(mut self, gla: f64) -> Self {
        self.gla = Some(gla);
        self
    }

    /// Sets the distance to the subject in miles.
    #[must_use]
    pub fn distance_miles(mut self, distance: f64) -> Self {
        self.distance_miles = distance;
        self
    }

    /// Sets the whole months elapsed since the sale.
    #[must_use]
    pub fn months_since_sale(mut self, months: u32) -> Self {
        self.months_since_sale = months;
        self
    }

    /// Sets the quality rating.
    #[must_use]
    pub fn quality(mut self, quality: Rating) -> Self {
        self.quality = quality;
        self
    }

    /// Sets the condition rating.
    #[must_use]
    pub fn condition(mut self, condition: Rating) -> Self {
        self.condition = condition;
        self
    }

    /// Sets the market-polygon containment flag.
    #[must_use]
    pub fn in_polygon(mut self, in_polygon: bool) -> Self {
        self.in_polygon = in_polygon;
        self
    }

    /// Validates invariants and builds the candidate.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidPrice`] for a non-positive price.
    /// - [`DomainError::InvalidDistance`] for a negative or non-finite
    ///   distance.
    /// - [`DomainError::InvalidArea`] for a non-positive living area.
    pub fn build(self) -> DomainResult<CandidateComp> {
        if !self.sale_price.is_finite() || self.sale_price <= 0.0 {
            return Err(DomainError::InvalidPrice(self.sale_price));
        }
        if !self.distance_miles.is_finite() || self.distance_miles < 0.0 {
            return Err(DomainError::InvalidDistance(self.distance_miles));
        }
        if let Some(gla) = self.gla {
            if !gla.is_finite() || gla <= 0.0 {
                return Err(DomainError::InvalidArea(gla));
            }
        }
        Ok(CandidateComp {
            id: self.id,
            kind: self.kind,
            sale_price: self.sale_price,
            sale_date: self.sale_date,
            gla: self.gla,
            distance_miles: self.distance_miles,
            months_since_sale: self.months_since_sale,
            quality: self.quality,
            condition: self.condition,
            in_polygon: self.in_polygon,
        })
    }
}
