//! Auction investment calculator.
//!
//! Derives the full cost breakdown of buying a property at auction and
//! reselling it, then the net result and its total/monthly return.
//! Pure arithmetic: no I/O, no rounding, no failure for finite input.

pub mod sweep;

use tracing::debug;

use crate::types::{AuctionScenario, FixedRates, ScenarioResult};

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Scenario evaluator bound to a set of fixed statutory rates.
#[derive(Debug, Clone, Default)]
pub struct AuctionCalculator {
    rates: FixedRates,
}

impl AuctionCalculator {
    pub fn new(rates: FixedRates) -> Self {
        Self { rates }
    }

    /// Access the fixed rates.
    pub fn rates(&self) -> &FixedRates {
        &self.rates
    }

    /// Evaluate one scenario.
    ///
    /// Steps run in a fixed order, each depending only on earlier ones:
    /// acquisition price → capital gain → taxes → fees → renovation →
    /// holding costs → sale commission → totals → returns.
    pub fn evaluate(&self, scenario: &AuctionScenario) -> ScenarioResult {
        let rates = &self.rates;

        let acquisition_price = scenario.initial_bid * (1.0 + scenario.premium_percent / 100.0);

        // No tax refund on a loss
        let capital_gain = (scenario.market_value - acquisition_price).max(0.0);

        // Taxes and registration
        let capital_gains_tax = capital_gain * (rates.capital_gains_tax_percent / 100.0);
        let transfer_tax = acquisition_price * (rates.transfer_tax_percent / 100.0);
        let registration_fee = acquisition_price * (rates.registration_fee_percent / 100.0);
        let tax_total = capital_gains_tax + transfer_tax + registration_fee;

        // Auctioneer and legal advisory
        let auctioneer_commission =
            acquisition_price * (rates.auctioneer_commission_percent / 100.0);
        let advisory_fee = acquisition_price * (scenario.advisory_fee_percent / 100.0);
        let fee_total = auctioneer_commission + advisory_fee;

        let renovation_cost = scenario.area_m2 * scenario.renovation_cost_per_m2;

        // Holding costs until the sale
        let months = f64::from(scenario.months_to_sale);
        let property_tax_total = scenario.monthly_property_tax * months;
        let condo_fee_total = scenario.monthly_condo_fee * months;
        let holding_total = property_tax_total + condo_fee_total;

        let sale_commission = scenario.market_value * (scenario.sale_commission_percent / 100.0);

        let total_costs = tax_total + fee_total + renovation_cost + holding_total + sale_commission;
        let total_invested = acquisition_price + total_costs;
        let net_result = scenario.market_value - total_invested;

        let return_percent = if total_invested > 0.0 {
            net_result / total_invested * 100.0
        } else {
            0.0
        };

        let monthly_return_percent = monthly_equivalent(return_percent, scenario.months_to_sale);

        debug!(
            premium = format!("{:.1}%", scenario.premium_percent),
            acquisition_price = format!("{:.2}", acquisition_price),
            total_invested = format!("{:.2}", total_invested),
            net_result = format!("{:.2}", net_result),
            return_pct = format!("{:.2}%", return_percent),
            "Scenario evaluated"
        );

        ScenarioResult {
            premium_percent: scenario.premium_percent,
            acquisition_price,
            market_value: scenario.market_value,
            capital_gain,
            capital_gains_tax,
            transfer_tax,
            registration_fee,
            tax_total,
            auctioneer_commission,
            advisory_fee,
            fee_total,
            renovation_cost,
            months_to_sale: scenario.months_to_sale,
            property_tax_total,
            condo_fee_total,
            holding_total,
            sale_commission,
            total_costs,
            total_invested,
            net_result,
            return_percent,
            monthly_return_percent,
        }
    }
}

/// Evaluate with the standard fixed rates.
pub fn evaluate(scenario: &AuctionScenario) -> ScenarioResult {
    AuctionCalculator::default().evaluate(scenario)
}

/// Monthly rate that compounds to `return_percent` over `months`.
///
/// `((1 + r/100)^(1/months) - 1) * 100`. Zero when there is no horizon or
/// when the total return is -100% or worse, where the root of a
/// non-positive base is undefined.
pub fn monthly_equivalent(return_percent: f64, months: u32) -> f64 {
    if months == 0 || return_percent <= -100.0 {
        return 0.0;
    }
    ((1.0 + return_percent / 100.0).powf(1.0 / f64::from(months)) - 1.0) * 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
