//! # Domain Enums
//!
//! Enumeration types for engine concepts.
//!
//! - [`RecordStatus`] - lifecycle status of a market record
//! - [`CompKind`] - closed sale or active listing
//! - [`ValueBasis`] - raw sale price or price-per-square-foot
//! - [`CenterBasis`] - how the Hi-Lo center value is determined
//! - [`TrendMethod`] - which estimator produced a trend result
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits. Wire spellings match the shapes
//! supplied by the order layer (`sold`, `salePrice`, `medianTimeAdj`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {0} value: {1}")]
pub struct ParseEnumError(pub &'static str, pub String);

/// Lifecycle status of a market record.
///
/// # Examples
///
/// ```
/// use comp_select::domain::value_objects::enums::RecordStatus;
///
/// let status: RecordStatus = "sold".parse().unwrap();
/// assert!(status.is_sold());
/// assert_eq!(status.to_string(), "sold");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum RecordStatus {
    /// Closed sale with a recorded price.
    Sold = 0,
    /// Active listing on the market.
    Active = 1,
    /// Under contract, not yet closed.
    Pending = 2,
    /// Listing expired without a sale.
    Expired = 3,
}

impl RecordStatus {
    /// Returns true if this record is a closed sale.
    #[inline]
    #[must_use]
    pub const fn is_sold(self) -> bool {
        matches!(self, Self::Sold)
    }

    /// Returns true if this record is an active listing.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sold => write!(f, "sold"),
            Self::Active => write!(f, "active"),
            Self::Pending => write!(f, "pending"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

impl FromStr for RecordStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            // "closed" is the pre-v2 feed spelling for a completed sale.
            "sold" | "closed" => Ok(Self::Sold),
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseEnumError("RecordStatus", s.to_string())),
        }
    }
}

/// Whether a candidate comparable is a closed sale or an active listing.
///
/// Sales and listings are selected into separate bounded lists by the Hi-Lo
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CompKind {
    /// Closed comparable sale.
    Sale = 0,
    /// Active comparable listing.
    Listing = 1,
}

impl CompKind {
    /// Returns true for a closed sale.
    #[inline]
    #[must_use]
    pub const fn is_sale(self) -> bool {
        matches!(self, Self::Sale)
    }

    /// Returns true for an active listing.
    #[inline]
    #[must_use]
    pub const fn is_listing(self) -> bool {
        matches!(self, Self::Listing)
    }
}

impl fmt::Display for CompKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sale => write!(f, "sale"),
            Self::Listing => write!(f, "listing"),
        }
    }
}

impl FromStr for CompKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sale" => Ok(Self::Sale),
            "listing" => Ok(Self::Listing),
            _ => Err(ParseEnumError("CompKind", s.to_string())),
        }
    }
}

/// Valuation basis for time adjustment and trend estimation.
///
/// Under [`ValueBasis::Ppsf`] a candidate without a positive living area
/// cannot be adjusted and must be excluded by the caller.
///
/// # Examples
///
/// ```
/// use comp_select::domain::value_objects::enums::ValueBasis;
///
/// assert_eq!(ValueBasis::Ppsf.to_string(), "ppsf");
/// let basis: ValueBasis = "salePrice".parse().unwrap();
/// assert_eq!(basis, ValueBasis::SalePrice);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ValueBasis {
    /// Raw sale price in dollars.
    SalePrice = 0,
    /// Price per square foot of living area.
    Ppsf = 1,
}

impl ValueBasis {
    /// Returns true for the price-per-square-foot basis.
    #[inline]
    #[must_use]
    pub const fn is_ppsf(self) -> bool {
        matches!(self, Self::Ppsf)
    }
}

impl fmt::Display for ValueBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SalePrice => write!(f, "salePrice"),
            Self::Ppsf => write!(f, "ppsf"),
        }
    }
}

impl FromStr for ValueBasis {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "salePrice" => Ok(Self::SalePrice),
            "ppsf" => Ok(Self::Ppsf),
            _ => Err(ParseEnumError("ValueBasis", s.to_string())),
        }
    }
}

/// How the Hi-Lo center value is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum CenterBasis {
    /// Median of all time-adjusted candidate values.
    MedianTimeAdj = 0,
    /// Average of time-adjusted values for caller-supplied primary comps.
    WeightedPrimaries = 1,
    /// Opaque value supplied by an external regression model.
    Model = 2,
}

impl fmt::Display for CenterBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MedianTimeAdj => write!(f, "medianTimeAdj"),
            Self::WeightedPrimaries => write!(f, "weightedPrimaries"),
            Self::Model => write!(f, "model"),
        }
    }
}

impl FromStr for CenterBasis {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medianTimeAdj" => Ok(Self::MedianTimeAdj),
            "weightedPrimaries" => Ok(Self::WeightedPrimaries),
            "model" => Ok(Self::Model),
            _ => Err(ParseEnumError("CenterBasis", s.to_string())),
        }
    }
}

/// Which estimator produced a trend result.
///
/// Downstream consumers use this tag to flag low-confidence trends: the
/// ordinary-least-squares fallback and the insufficient-data zero trend both
/// indicate thin market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum TrendMethod {
    /// Theil-Sen robust regression (primary estimator).
    TheilSen = 0,
    /// Ordinary least squares (degraded mode for sparse months).
    Ols = 1,
    /// Fewer than two usable month points; zero trend returned.
    Insufficient = 2,
}

impl TrendMethod {
    /// Returns true if the result came from the robust primary estimator.
    #[inline]
    #[must_use]
    pub const fn is_robust(self) -> bool {
        matches!(self, Self::TheilSen)
    }
}

impl fmt::Display for TrendMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TheilSen => write!(f, "theilSen"),
            Self::Ols => write!(f, "ols"),
            Self::Insufficient => write!(f, "insufficient"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_status_round_trip() {
        for s in ["sold", "active", "pending", "expired"] {
            let status: RecordStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
    }

    #[test]
    fn record_status_accepts_legacy_closed() {
        let status: RecordStatus = "Closed".parse().unwrap();
        assert!(status.is_sold());
    }

    #[test]
    fn record_status_rejects_unknown() {
        assert!("withdrawn".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn value_basis_serde_spelling() {
        let json = serde_json::to_string(&ValueBasis::SalePrice).unwrap();
        assert_eq!(json, "\"salePrice\"");
        let basis: ValueBasis = serde_json::from_str("\"ppsf\"").unwrap();
        assert!(basis.is_ppsf());
    }

    #[test]
    fn center_basis_parse() {
        assert_eq!(
            "weightedPrimaries".parse::<CenterBasis>().unwrap(),
            CenterBasis::WeightedPrimaries
        );
        assert!("average".parse::<CenterBasis>().is_err());
    }

    #[test]
    fn trend_method_robust_flag() {
        assert!(TrendMethod::TheilSen.is_robust());
        assert!(!TrendMethod::Ols.is_robust());
        assert!(!TrendMethod::Insufficient.is_robust());
    }

    #[test]
    fn comp_kind_display() {
        assert_eq!(CompKind::Sale.to_string(), "sale");
        assert_eq!(CompKind::Listing.to_string(), "listing");
    }
}
