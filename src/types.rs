//! Shared types for the auction simulator.
//!
//! The scenario/result pair is the data model every other module works
//! against: the calculator produces results, the report renders them and
//! the comparables estimator checks the scenario's market value.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

/// Statutory and customary rates that are not user-editable.
///
/// All values are percentages and are applied as `rate / 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedRates {
    /// Income tax on the capital gain (IRPF).
    pub capital_gains_tax_percent: f64,
    /// Property transfer tax on the acquisition price (ITBI).
    pub transfer_tax_percent: f64,
    /// Deed registration on the acquisition price.
    pub registration_fee_percent: f64,
    /// Auctioneer's commission on the acquisition price.
    pub auctioneer_commission_percent: f64,
}

impl FixedRates {
    pub const STANDARD: FixedRates = FixedRates {
        capital_gains_tax_percent: 15.0,
        transfer_tax_percent: 3.0,
        registration_fee_percent: 1.0,
        auctioneer_commission_percent: 5.0,
    };
}

impl Default for FixedRates {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A percentage that only applies when switched on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionalRate {
    pub enabled: bool,
    pub percent: f64,
}

impl OptionalRate {
    /// Legal advisory defaults to 6% of the acquisition price.
    pub const DEFAULT_ADVISORY_PERCENT: f64 = 6.0;

    pub fn enabled(percent: f64) -> Self {
        Self { enabled: true, percent }
    }

    pub fn disabled() -> Self {
        Self { enabled: false, percent: 0.0 }
    }

    pub fn advisory_default() -> Self {
        Self::enabled(Self::DEFAULT_ADVISORY_PERCENT)
    }

    /// The rate to feed into the calculator: `percent` when enabled, 0 otherwise.
    pub fn effective_percent(&self) -> f64 {
        if self.enabled {
            self.percent
        } else {
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// Inputs for one auction purchase-and-resale evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionScenario {
    /// Opening bid (lance inicial).
    pub initial_bid: f64,
    /// Estimated resale value.
    pub market_value: f64,
    pub area_m2: f64,
    pub renovation_cost_per_m2: f64,
    /// IPTU per month.
    pub monthly_property_tax: f64,
    pub monthly_condo_fee: f64,
    /// Premium (ágio) over the bid, in percent.
    pub premium_percent: f64,
    /// Broker commission on the resale, in percent of market value. 0 when disabled.
    pub sale_commission_percent: f64,
    /// Legal advisory, in percent of acquisition price. 0 when disabled.
    pub advisory_fee_percent: f64,
    /// Holding horizon until the sale closes.
    pub months_to_sale: u32,
}

impl AuctionScenario {
    /// Same scenario with a different premium.
    pub fn with_premium(&self, premium_percent: f64) -> Self {
        Self {
            premium_percent,
            ..self.clone()
        }
    }

    /// Check that a caller-built scenario is sane.
    ///
    /// The calculator never calls this; it accepts any finite input.
    pub fn validate(&self) -> Result<(), AuctionError> {
        let fields = [
            ("initial_bid", self.initial_bid),
            ("market_value", self.market_value),
            ("area_m2", self.area_m2),
            ("renovation_cost_per_m2", self.renovation_cost_per_m2),
            ("monthly_property_tax", self.monthly_property_tax),
            ("monthly_condo_fee", self.monthly_condo_fee),
            ("premium_percent", self.premium_percent),
            ("sale_commission_percent", self.sale_commission_percent),
            ("advisory_fee_percent", self.advisory_fee_percent),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(AuctionError::invalid(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(AuctionError::invalid(field, "must not be negative"));
            }
        }

        if self.months_to_sale < 1 {
            return Err(AuctionError::invalid("months_to_sale", "must be at least 1"));
        }

        Ok(())
    }

    /// Sample scenario used across the test suite.
    #[cfg(test)]
    pub fn sample() -> Self {
        AuctionScenario {
            initial_bid: 500_000.0,
            market_value: 1_000_000.0,
            area_m2: 100.0,
            renovation_cost_per_m2: 1_000.0,
            monthly_property_tax: 100.0,
            monthly_condo_fee: 1_500.0,
            premium_percent: 0.0,
            sale_commission_percent: 0.0,
            advisory_fee_percent: 6.0,
            months_to_sale: 12,
        }
    }
}

impl Default for AuctionScenario {
    fn default() -> Self {
        Self {
            initial_bid: 0.0,
            market_value: 0.0,
            area_m2: 0.0,
            renovation_cost_per_m2: 0.0,
            monthly_property_tax: 0.0,
            monthly_condo_fee: 0.0,
            premium_percent: 20.0,
            sale_commission_percent: 0.0,
            advisory_fee_percent: OptionalRate::DEFAULT_ADVISORY_PERCENT,
            months_to_sale: 12,
        }
    }
}

impl fmt::Display for AuctionScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bid {:.2} +{:.1}% | market {:.2} | {:.0} m² | {} months",
            self.initial_bid,
            self.premium_percent,
            self.market_value,
            self.area_m2,
            self.months_to_sale,
        )
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Full cost breakdown and outcome of one evaluation.
///
/// Built once per evaluation and never mutated. Monetary fields are
/// non-negative for conforming input, except `net_result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub premium_percent: f64,
    /// Bid plus premium (valor do arremate).
    pub acquisition_price: f64,
    pub market_value: f64,
    /// `max(market_value - acquisition_price, 0)`.
    pub capital_gain: f64,

    pub capital_gains_tax: f64,
    pub transfer_tax: f64,
    pub registration_fee: f64,
    pub tax_total: f64,

    pub auctioneer_commission: f64,
    pub advisory_fee: f64,
    pub fee_total: f64,

    pub renovation_cost: f64,

    pub months_to_sale: u32,
    pub property_tax_total: f64,
    pub condo_fee_total: f64,
    /// `(monthly_property_tax + monthly_condo_fee) * months_to_sale`.
    pub holding_total: f64,

    pub sale_commission: f64,

    pub total_costs: f64,
    pub total_invested: f64,
    pub net_result: f64,
    pub return_percent: f64,
    pub monthly_return_percent: f64,
}

impl ScenarioResult {
    pub fn is_profitable(&self) -> bool {
        self.net_result > 0.0
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "acquired {:.2} | invested {:.2} | net {:.2} ({:.1}%, {:.2}%/month)",
            self.acquisition_price,
            self.total_invested,
            self.net_result,
            self.return_percent,
            self.monthly_return_percent,
        )
    }
}

/// One line of a premium sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub premium_percent: f64,
    pub result: ScenarioResult,
}

// ---------------------------------------------------------------------------
// Comparables
// ---------------------------------------------------------------------------

/// Observed comparable listing prices, checked against the scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableSummary {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// `(average - market_value) / market_value * 100`; `None` when market value is 0.
    pub delta_percent: Option<f64>,
}

impl ComparableSummary {
    /// Summarise a price list. Returns `None` when nothing was observed.
    pub fn from_prices(prices: &[f64], market_value: f64) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }

        let count = prices.len();
        let average = prices.iter().sum::<f64>() / count as f64;
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let delta_percent = if market_value != 0.0 {
            Some((average - market_value) / market_value * 100.0)
        } else {
            None
        };

        Some(Self {
            count,
            average,
            min,
            max,
            delta_percent,
        })
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Cannot parse number: {0:?}")]
    Parse(String),

    #[error("Price source error ({source_name}): {message}")]
    PriceSource { source_name: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuctionError {
    pub fn invalid(field: &str, reason: &str) -> Self {
        AuctionError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
