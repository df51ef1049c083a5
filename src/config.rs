//! # Engine Configuration
//!
//! Loads and validates engine settings from layered sources.
//!
//! This is the validation boundary for the documented ranges: weights in
//! `[0, 10]`, GLA tolerance 5-20 %, distance cap 0.25-5.0 miles, and
//! `box_pct` in `[5, 20]`. The engine itself does not re-enforce these; a
//! configuration that passes [`EngineConfig::validate`] is trusted
//! downstream.
//!
//! Sources layer in order: an optional TOML file, then environment
//! variables prefixed `COMP_SELECT_` (e.g. `COMP_SELECT_HILO__BOX_PCT=15`).

use crate::application::error::{EngineError, EngineResult};
use crate::domain::value_objects::{
    CenterBasis, ConstraintSet, HiLoSettings, ValueBasis, WeightSet,
};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Raw weight settings as they appear in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Distance factor weight.
    pub distance: f64,
    /// Recency factor weight.
    pub recency: f64,
    /// GLA factor weight.
    pub gla: f64,
    /// Quality factor weight.
    pub quality: f64,
    /// Condition factor weight.
    pub condition: f64,
    /// Optional location factor weight.
    pub location: Option<f64>,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            distance: 1.0,
            recency: 1.0,
            gla: 1.0,
            quality: 1.0,
            condition: 1.0,
            location: None,
        }
    }
}

/// Raw constraint settings as they appear in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintConfig {
    /// GLA tolerance as a percentage of subject GLA.
    pub gla_tolerance_pct: f64,
    /// Distance cap in miles.
    pub distance_cap_miles: f64,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            gla_tolerance_pct: 10.0,
            distance_cap_miles: 1.0,
        }
    }
}

/// Raw Hi-Lo settings as they appear in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HiLoConfig {
    /// Valuation basis.
    pub basis: ValueBasis,
    /// Box half-width percentage.
    pub box_pct: f64,
    /// Maximum sales to select.
    pub max_sales: usize,
    /// Maximum listings to select.
    pub max_listings: usize,
    /// Restrict ranking to polygon-contained candidates.
    pub inside_polygon_only: bool,
    /// Center determination basis.
    pub center_basis: CenterBasis,
}

impl Default for HiLoConfig {
    fn default() -> Self {
        Self {
            basis: ValueBasis::SalePrice,
            box_pct: 10.0,
            max_sales: 6,
            max_listings: 4,
            inside_polygon_only: false,
            center_basis: CenterBasis::MedianTimeAdj,
        }
    }
}

/// Raw trend-estimation settings as they appear in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Lookback window in months.
    pub lookback_months: u32,
    /// Minimum sales per month gating the robust estimator.
    pub min_sales_per_month: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            lookback_months: 12,
            min_sales_per_month: 3,
        }
    }
}

/// Engine configuration as loaded from file and environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Similarity weights.
    pub weights: WeightConfig,
    /// Scoring constraints.
    pub constraints: ConstraintConfig,
    /// Hi-Lo selection settings.
    pub hilo: HiLoConfig,
    /// Trend estimation settings.
    pub trend: TrendConfig,
}

/// Validated engine configuration, ready to construct services.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Validated similarity weights.
    pub weights: WeightSet,
    /// Validated scoring constraints.
    pub constraints: ConstraintSet,
    /// Hi-Lo settings with a validated `box_pct`.
    pub settings: HiLoSettings,
    /// Trend estimation settings.
    pub trend: TrendConfig,
}

impl EngineConfig {
    /// Loads configuration from an optional TOML file and the environment.
    ///
    /// Environment variables use the `COMP_SELECT_` prefix with `__` as the
    /// section separator. Missing sources fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when a source cannot be read
    /// or a field fails to deserialize.
    pub fn load(path: Option<&str>) -> EngineResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        builder
            .add_source(Environment::with_prefix("COMP_SELECT").separator("__"))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| EngineError::configuration(e.to_string()))
    }

    /// Validates the raw configuration into typed value objects.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Domain`] for weight or constraint range
    /// violations and [`EngineError::Validation`] for an out-of-range
    /// `box_pct`.
    pub fn validate(self) -> EngineResult<ValidatedConfig> {
        let mut weights = WeightSet::new(
            self.weights.distance,
            self.weights.recency,
            self.weights.gla,
            self.weights.quality,
            self.weights.condition,
        )?;
        if let Some(location) = self.weights.location {
            weights = weights.with_location(location)?;
        }

        let constraints = ConstraintSet::new(
            self.constraints.gla_tolerance_pct,
            self.constraints.distance_cap_miles,
        )?;

        if !self.hilo.box_pct.is_finite()
            || !(HiLoSettings::BOX_PCT_MIN..=HiLoSettings::BOX_PCT_MAX)
                .contains(&self.hilo.box_pct)
        {
            return Err(EngineError::validation(format!(
                "box_pct must be within [{}, {}], got {}",
                HiLoSettings::BOX_PCT_MIN,
                HiLoSettings::BOX_PCT_MAX,
                self.hilo.box_pct
            )));
        }

        let settings = HiLoSettings::new(self.hilo.basis, self.hilo.box_pct)
            .with_max_sales(self.hilo.max_sales)
            .with_max_listings(self.hilo.max_listings)
            .with_inside_polygon_only(self.hilo.inside_polygon_only)
            .with_center_basis(self.hilo.center_basis);

        Ok(ValidatedConfig {
            weights,
            constraints,
            settings,
            trend: self.trend,
        })
    }
}
