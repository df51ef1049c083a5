//! # Trend Cache
//!
//! Process-wide cache of computed market trends, keyed by
//! `(market, lookback, metric)`.
//!
//! Invalidation is entirely caller-controlled: the engine never expires or
//! refreshes entries on its own. When new market data arrives, the
//! persistence layer invalidates the affected market and the next request
//! recomputes.

use crate::domain::value_objects::{TrendResult, ValueBasis};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache key identifying one trend computation context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendKey {
    /// Market identifier (neighborhood, MLS area, polygon id).
    pub market: String,
    /// Lookback window in months.
    pub lookback_months: u32,
    /// Metric being trended.
    pub metric: ValueBasis,
}

impl TrendKey {
    /// Creates a cache key.
    #[must_use]
    pub fn new(market: impl Into<String>, lookback_months: u32, metric: ValueBasis) -> Self {
        Self {
            market: market.into(),
            lookback_months,
            metric,
        }
    }
}

impl fmt::Display for TrendKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}mo/{}",
            self.market, self.lookback_months, self.metric
        )
    }
}

/// Concurrent cache of [`TrendResult`]s.
///
/// # Examples
///
/// ```
/// use comp_select::application::services::trend_cache::{TrendCache, TrendKey};
/// use comp_select::domain::value_objects::{TrendResult, ValueBasis};
///
/// let cache = TrendCache::new();
/// let key = TrendKey::new("maple-heights", 12, ValueBasis::Ppsf);
///
/// let trend = cache.get_or_compute(&key, || TrendResult::insufficient(0, 0, 0));
/// assert_eq!(cache.len(), 1);
///
/// cache.invalidate(&key);
/// assert!(cache.get(&key).is_none());
/// # let _ = trend;
/// ```
#[derive(Debug, Default)]
pub struct TrendCache {
    inner: DashMap<TrendKey, TrendResult>,
}

impl TrendCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached trend for a key, if present.
    #[must_use]
    pub fn get(&self, key: &TrendKey) -> Option<TrendResult> {
        self.inner.get(key).map(|entry| *entry.value())
    }

    /// Returns the cached trend or computes, stores, and returns it.
    pub fn get_or_compute(
        &self,
        key: &TrendKey,
        compute: impl FnOnce() -> TrendResult,
    ) -> TrendResult {
        if let Some(cached) = self.get(key) {
            return cached;
        }
        let trend = compute();
        self.inner.insert(key.clone(), trend);
        trend
    }

    /// Stores a trend, replacing any existing entry for the key.
    pub fn insert(&self, key: TrendKey, trend: TrendResult) {
        self.inner.insert(key, trend);
    }

    /// Removes one entry. Returns true if it existed.
    pub fn invalidate(&self, key: &TrendKey) -> bool {
        self.inner.remove(key).is_some()
    }

    /// Removes every entry for a market (all lookbacks and metrics).
    /// Returns the number of entries removed.
    pub fn invalidate_market(&self, market: &str) -> usize {
        let before = self.inner.len();
        self.inner.retain(|key, _| key.market != market);
        before - self.inner.len()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Returns the number of cached trends.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
