//! Comparable-price estimation.
//!
//! Defines the `PriceSource` trait and the `ComparableEstimator` that fans a
//! free-text address out to every configured source. Sources are
//! best-effort: a failing source is logged and skipped, and an estimation
//! that finds nothing returns an empty list rather than an error.

pub mod search;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::types::ComparableSummary;

/// Abstraction over places that can report asking prices near an address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Observed prices for listings comparable to `address`.
    async fn fetch_prices(&self, address: &str) -> Result<Vec<f64>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

/// Plausible price range. Anything outside is treated as noise
/// (rents, condo fees, per-m² figures picked up by extraction).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self {
            min_price: 50_000.0,
            max_price: 50_000_000.0,
        }
    }
}

impl PriceBounds {
    pub fn contains(&self, price: f64) -> bool {
        price.is_finite() && price >= self.min_price && price <= self.max_price
    }
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

pub struct ComparableEstimator {
    sources: Vec<Box<dyn PriceSource>>,
    bounds: PriceBounds,
}

impl ComparableEstimator {
    pub fn new(sources: Vec<Box<dyn PriceSource>>, bounds: PriceBounds) -> Self {
        Self { sources, bounds }
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Query all sources concurrently and merge their prices.
    ///
    /// Prices keep source order, then in-source order. One attempt per
    /// source; errors never propagate.
    pub async fn estimate(&self, address: &str) -> Vec<f64> {
        let address = address.trim();
        if address.is_empty() {
            warn!("Empty address, skipping comparable search");
            return Vec::new();
        }

        let fetches = self.sources.iter().map(|s| s.fetch_prices(address));
        let results = futures::future::join_all(fetches).await;

        let mut prices = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(found) => {
                    let total = found.len();
                    let kept: Vec<f64> = found
                        .into_iter()
                        .filter(|p| self.bounds.contains(*p))
                        .collect();
                    debug!(
                        source = source.name(),
                        found = total,
                        kept = kept.len(),
                        "Source returned prices"
                    );
                    prices.extend(kept);
                }
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "Price source failed, skipping"
                    );
                }
            }
        }

        info!(
            address,
            sources = self.sources.len(),
            prices = prices.len(),
            "Comparable search complete"
        );

        prices
    }

    /// Estimate and summarise against the scenario's market value.
    pub async fn compare(&self, address: &str, market_value: f64) -> Option<ComparableSummary> {
        let prices = self.estimate(address).await;
        ComparableSummary::from_prices(&prices, market_value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
