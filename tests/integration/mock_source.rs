//! Mock price source for integration testing.
//!
//! Provides a deterministic `PriceSource` that returns canned prices per
//! address and can be forced to fail, all in-memory with no network.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use auction_sim::comparables::{ComparableEstimator, PriceBounds, PriceSource};
use auction_sim::report::render_comparables;

/// A mock price source for deterministic testing.
pub struct MockSource {
    name: &'static str,
    prices: HashMap<String, Vec<f64>>,
    calls: Arc<Mutex<Vec<String>>>,
    /// If set, every fetch returns this error.
    force_error: Arc<Mutex<Option<String>>>,
}

impl MockSource {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            prices: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_prices(mut self, address: &str, prices: &[f64]) -> Self {
        self.prices.insert(address.to_string(), prices.to_vec());
        self
    }

    /// Force all subsequent fetches to return an error.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Handle on the recorded calls, usable after the source is boxed.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl PriceSource for MockSource {
    async fn fetch_prices(&self, address: &str) -> Result<Vec<f64>> {
        self.calls.lock().unwrap().push(address.to_string());

        if let Some(msg) = self.force_error.lock().unwrap().clone() {
            return Err(anyhow!(msg));
        }

        Ok(self.prices.get(address).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

const ADDRESS: &str = "Rua Haddock Lobo, 595 - São Paulo";

#[tokio::test]
async fn every_source_is_queried_once() {
    let a = MockSource::new("a").with_prices(ADDRESS, &[700_000.0]);
    let b = MockSource::new("b").with_prices(ADDRESS, &[900_000.0]);
    let (calls_a, calls_b) = (a.calls(), b.calls());

    let estimator = ComparableEstimator::new(vec![Box::new(a), Box::new(b)], PriceBounds::default());
    assert_eq!(estimator.source_count(), 2);

    let prices = estimator.estimate(ADDRESS).await;
    assert_eq!(prices, vec![700_000.0, 900_000.0]);
    assert_eq!(calls_a.lock().unwrap().as_slice(), [ADDRESS.to_string()]);
    assert_eq!(calls_b.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn one_failure_does_not_abort_estimation() {
    let broken = MockSource::new("broken").with_prices(ADDRESS, &[1.0]);
    broken.set_error("HTTP 503");
    let healthy = MockSource::new("healthy").with_prices(ADDRESS, &[800_000.0, 1_200_000.0]);

    let estimator =
        ComparableEstimator::new(vec![Box::new(broken), Box::new(healthy)], PriceBounds::default());
    let summary = estimator.compare(ADDRESS, 1_000_000.0).await.unwrap();

    assert_eq!(summary.count, 2);
    assert!((summary.average - 1_000_000.0).abs() < 1e-6);
    assert!(summary.delta_percent.unwrap().abs() < 1e-9);
}

#[tokio::test]
async fn unknown_address_yields_no_summary() {
    let source = MockSource::new("a").with_prices(ADDRESS, &[500_000.0]);
    let estimator = ComparableEstimator::new(vec![Box::new(source)], PriceBounds::default());

    let summary = estimator.compare("Nowhere 0", 1_000_000.0).await;
    assert!(summary.is_none());
    assert_eq!(render_comparables(summary.as_ref(), 1_000_000.0), "No comparable prices found.\n");
}

#[tokio::test]
async fn no_sources_yields_empty() {
    let estimator = ComparableEstimator::new(Vec::new(), PriceBounds::default());
    assert!(estimator.estimate(ADDRESS).await.is_empty());
}

#[tokio::test]
async fn custom_bounds_filter_prices() {
    let source = MockSource::new("a").with_prices(ADDRESS, &[90_000.0, 150_000.0, 2_000_000.0]);
    let bounds = PriceBounds {
        min_price: 100_000.0,
        max_price: 1_000_000.0,
    };
    let estimator = ComparableEstimator::new(vec![Box::new(source)], bounds);
    assert_eq!(estimator.estimate(ADDRESS).await, vec![150_000.0]);
}
