//! # Legacy Schema Adapter
//!
//! Parses the two generations of upstream payloads into validated engine
//! inputs.
//!
//! The v2 feed uses camelCase field names (`pctPerMonth`, `salePrice`);
//! the legacy feed uses PascalCase MLS export names (`MonthlyRate` era:
//! `monthlyRate`, `SoldPrice`, `SqFt`). Each shape is a serde variant;
//! parsing tries v2 first, so a payload carrying both generations of a
//! field resolves to the v2 value. Entries that fail validation are
//! skipped with a trace and counted in the returned report — ingestion is
//! best-effort, but never silent.

use crate::application::error::{EngineError, EngineResult};
use crate::application::services::time_adjustment::months_between;
use crate::domain::entities::{CandidateComp, MarketRecord};
use crate::domain::value_objects::{CompKind, GeoPoint, GeoPolygon, Rating, RecordStatus};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Trend-rate payload across schema generations.
///
/// `pctPerMonth` (v2) and `monthlyRate` (legacy) carry the same fractional
/// monthly rate under different names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TrendRatePayload {
    V2 {
        #[serde(rename = "pctPerMonth")]
        pct_per_month: f64,
    },
    V1 {
        #[serde(rename = "monthlyRate")]
        monthly_rate: f64,
    },
}

/// Extracts the monthly trend rate from a trend-settings payload.
///
/// The v2 `pctPerMonth` field wins when both spellings are present.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when neither field is present or the
/// rate is not a usable number (`rate <= -1` would make the compounding
/// factor non-positive).
///
/// # Examples
///
/// ```
/// use comp_select::ingest::parse_trend_rate;
/// use serde_json::json;
///
/// let rate = parse_trend_rate(&json!({ "pctPerMonth": 0.01 })).unwrap();
/// assert_eq!(rate, 0.01);
///
/// // Legacy spelling still parses.
/// let rate = parse_trend_rate(&json!({ "monthlyRate": -0.005 })).unwrap();
/// assert_eq!(rate, -0.005);
/// ```
pub fn parse_trend_rate(value: &Value) -> EngineResult<f64> {
    let payload: TrendRatePayload = serde_json::from_value(value.clone())
        .map_err(|e| EngineError::validation(format!("unrecognized trend payload: {e}")))?;
    let rate = match payload {
        TrendRatePayload::V2 { pct_per_month } => pct_per_month,
        TrendRatePayload::V1 { monthly_rate } => monthly_rate,
    };
    if !rate.is_finite() || rate <= -1.0 {
        return Err(EngineError::validation(format!(
            "monthly rate out of range: {rate}"
        )));
    }
    Ok(rate)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordPayload {
    V2(RecordV2),
    V1(RecordV1),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordV2 {
    status: String,
    #[serde(default)]
    sale_price: Option<f64>,
    #[serde(default)]
    list_price: Option<f64>,
    #[serde(default)]
    living_area: Option<f64>,
    #[serde(default)]
    close_date: Option<NaiveDate>,
    #[serde(default)]
    list_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct RecordV1 {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "SoldPrice", default)]
    sold_price: Option<f64>,
    #[serde(rename = "ListPrice", default)]
    list_price: Option<f64>,
    #[serde(rename = "SqFt", default)]
    sqft: Option<f64>,
    #[serde(rename = "SoldDate", default)]
    sold_date: Option<NaiveDate>,
    #[serde(rename = "ListDate", default)]
    list_date: Option<NaiveDate>,
}

/// Parsed market records plus the count of entries that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    /// Successfully parsed and validated records.
    pub records: Vec<MarketRecord>,
    /// Entries skipped for shape or validation failures.
    pub skipped: usize,
}

/// Parses raw market-record payloads, skipping and counting malformed
/// entries.
#[must_use]
pub fn parse_market_records(raw: &[Value]) -> IngestReport {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for (index, value) in raw.iter().enumerate() {
        match parse_record(value) {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                warn!(index, %reason, "skipping malformed market record");
            }
        }
    }

    IngestReport { records, skipped }
}

fn parse_record(value: &Value) -> Result<MarketRecord, String> {
    let payload: RecordPayload =
        serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
    let (status, sale_price, list_price, living_area, close_date, list_date) = match payload {
        RecordPayload::V2(r) => (
            r.status,
            r.sale_price,
            r.list_price,
            r.living_area,
            r.close_date,
            r.list_date,
        ),
        RecordPayload::V1(r) => (
            r.status,
            r.sold_price,
            r.list_price,
            r.sqft,
            r.sold_date,
            r.list_date,
        ),
    };
    let status: RecordStatus = status.parse::<RecordStatus>().map_err(|e| e.to_string())?;
    MarketRecord::new(status, sale_price, list_price, living_area, close_date, list_date)
        .map_err(|e| e.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CandidatePayload {
    V2(CandidateV2),
    V1(CandidateV1),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateV2 {
    id: String,
    #[serde(rename = "type")]
    kind: CompKind,
    sale_price: f64,
    sale_date: NaiveDate,
    #[serde(default)]
    gla: Option<f64>,
    #[serde(default)]
    distance_miles: Option<f64>,
    #[serde(default)]
    months_since_sale: Option<u32>,
    #[serde(default)]
    quality: Option<u8>,
    #[serde(default)]
    condition: Option<u8>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    in_polygon: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CandidateV1 {
    #[serde(rename = "MLSNumber")]
    id: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "SoldPrice", default)]
    sold_price: Option<f64>,
    #[serde(rename = "ListPrice", default)]
    list_price: Option<f64>,
    #[serde(rename = "SqFt", default)]
    sqft: Option<f64>,
    #[serde(rename = "SoldDate", default)]
    sold_date: Option<NaiveDate>,
    #[serde(rename = "ListDate", default)]
    list_date: Option<NaiveDate>,
    #[serde(rename = "DistanceMiles", default)]
    distance_miles: Option<f64>,
    #[serde(rename = "QualityRating", default)]
    quality: Option<u8>,
    #[serde(rename = "ConditionRating", default)]
    condition: Option<u8>,
    #[serde(rename = "Latitude", default)]
    lat: Option<f64>,
    #[serde(rename = "Longitude", default)]
    lng: Option<f64>,
}

/// Parsed candidates plus the count of entries that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateIngest {
    /// Successfully parsed and validated candidates.
    pub candidates: Vec<CandidateComp>,
    /// Entries skipped for shape or validation failures.
    pub skipped: usize,
}

/// Parses raw candidate payloads into scorable candidates.
///
/// `months_since_sale` is derived from the sale date and `effective_date`
/// when the payload does not carry it. When a market `polygon` is supplied
/// and the payload carries coordinates, the containment flag is stamped
/// here via the geo utility; an explicit `inPolygon` flag on the payload
/// wins over recomputation.
#[must_use]
pub fn parse_candidates(
    raw: &[Value],
    effective_date: NaiveDate,
    polygon: Option<&GeoPolygon>,
) -> CandidateIngest {
    let mut candidates = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for (index, value) in raw.iter().enumerate() {
        match parse_candidate(value, effective_date, polygon) {
            Ok(candidate) => candidates.push(candidate),
            Err(reason) => {
                skipped += 1;
                warn!(index, %reason, "skipping malformed candidate");
            }
        }
    }

    CandidateIngest {
        candidates,
        skipped,
    }
}

fn parse_candidate(
    value: &Value,
    effective_date: NaiveDate,
    polygon: Option<&GeoPolygon>,
) -> Result<CandidateComp, String> {
    let payload: CandidatePayload =
        serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;

    let (id, kind, price, sale_date, gla, distance, months, quality, condition, lat, lng, flag) =
        match payload {
            CandidatePayload::V2(c) => (
                c.id,
                c.kind,
                c.sale_price,
                c.sale_date,
                c.gla,
                c.distance_miles,
                c.months_since_sale,
                c.quality,
                c.condition,
                c.lat,
                c.lng,
                c.in_polygon,
            ),
            CandidatePayload::V1(c) => {
                let status: RecordStatus = c.status.parse::<RecordStatus>().map_err(|e| e.to_string())?;
                let (kind, price, date) = if status.is_sold() {
                    (CompKind::Sale, c.sold_price, c.sold_date)
                } else {
                    (CompKind::Listing, c.list_price, c.list_date)
                };
                let price = price.ok_or("candidate has no usable price")?;
                let date = date.ok_or("candidate has no usable date")?;
                (
                    c.id,
                    kind,
                    price,
                    date,
                    c.sqft,
                    c.distance_miles,
                    None,
                    c.quality,
                    c.condition,
                    c.lat,
                    c.lng,
                    None,
                )
            }
        };

    let months = months.unwrap_or_else(|| months_between(sale_date, effective_date));
    let in_polygon = match (flag, polygon, lat, lng) {
        (Some(flag), ..) => flag,
        (None, Some(poly), Some(lat), Some(lng)) => poly.contains(GeoPoint::new(lng, lat)),
        _ => false,
    };

    let mut builder = CandidateComp::builder(id, kind, price, sale_date)
        .distance_miles(distance.unwrap_or(0.0))
        .months_since_sale(months)
        .quality(Rating::new(quality.unwrap_or(3)).map_err(|e| e.to_string())?)
        .condition(Rating::new(condition.unwrap_or(3)).map_err(|e| e.to_string())?)
        .in_polygon(in_polygon);
    if let Some(gla) = gla {
        builder = builder.gla(gla);
    }
    builder.build().map_err(|e| e.to_string())
}
