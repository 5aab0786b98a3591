//! Golden-value regression tests for the scenario evaluator.
//!
//! The reference scenario: 500k bid, 1M market value, 100 m² at 1k/m²
//! renovation, 100 + 1.5k monthly, 6% advisory, no sale commission,
//! 12 months.

use auction_sim::calculator::{evaluate, monthly_equivalent, AuctionCalculator};
use auction_sim::types::{AuctionScenario, FixedRates, OptionalRate, ScenarioResult};

fn reference() -> AuctionScenario {
    AuctionScenario {
        initial_bid: 500_000.0,
        market_value: 1_000_000.0,
        area_m2: 100.0,
        renovation_cost_per_m2: 1_000.0,
        monthly_property_tax: 100.0,
        monthly_condo_fee: 1_500.0,
        premium_percent: 0.0,
        sale_commission_percent: OptionalRate::disabled().effective_percent(),
        advisory_fee_percent: OptionalRate::advisory_default().effective_percent(),
        months_to_sale: 12,
    }
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}

fn assert_decomposition(r: &ScenarioResult) {
    let parts = r.capital_gains_tax
        + r.transfer_tax
        + r.registration_fee
        + r.auctioneer_commission
        + r.advisory_fee
        + r.renovation_cost
        + r.holding_total
        + r.sale_commission;
    assert!((r.total_costs - parts).abs() <= 1e-9 * parts.abs().max(1.0));
    assert_eq!(r.total_invested, r.acquisition_price + r.total_costs);
    assert_eq!(r.net_result, r.market_value - r.total_invested);
}

#[test]
fn golden_zero_premium() {
    let r = evaluate(&reference());

    assert_close(r.acquisition_price, 500_000.0, "acquisition_price");
    assert_close(r.capital_gain, 500_000.0, "capital_gain");
    assert_close(r.capital_gains_tax, 75_000.0, "capital_gains_tax");
    assert_close(r.transfer_tax, 15_000.0, "transfer_tax");
    assert_close(r.registration_fee, 5_000.0, "registration_fee");
    assert_close(r.auctioneer_commission, 25_000.0, "auctioneer_commission");
    assert_close(r.advisory_fee, 30_000.0, "advisory_fee");
    assert_close(r.renovation_cost, 100_000.0, "renovation_cost");
    assert_close(r.holding_total, 19_200.0, "holding_total");
    assert_close(r.sale_commission, 0.0, "sale_commission");
    assert_close(r.total_costs, 269_200.0, "total_costs");
    assert_close(r.total_invested, 769_200.0, "total_invested");
    assert_close(r.net_result, 230_800.0, "net_result");
    assert_close(r.return_percent, 230_800.0 / 769_200.0 * 100.0, "return_percent");
    assert!((r.return_percent - 30.0).abs() < 0.01);
    assert!((r.monthly_return_percent - 2.21).abs() < 0.005);

    assert_decomposition(&r);
}

#[test]
fn golden_fifty_percent_premium() {
    let r = evaluate(&reference().with_premium(50.0));

    assert_close(r.acquisition_price, 750_000.0, "acquisition_price");
    assert_close(r.capital_gain, 250_000.0, "capital_gain");
    assert_close(r.capital_gains_tax, 37_500.0, "capital_gains_tax");
    assert_close(r.transfer_tax, 22_500.0, "transfer_tax");
    assert_close(r.registration_fee, 7_500.0, "registration_fee");
    assert_close(r.tax_total, 67_500.0, "tax_total");
    assert_close(r.auctioneer_commission, 37_500.0, "auctioneer_commission");
    assert_close(r.advisory_fee, 45_000.0, "advisory_fee");
    assert_close(r.fee_total, 82_500.0, "fee_total");
    assert_close(r.renovation_cost, 100_000.0, "renovation_cost");
    assert_close(r.holding_total, 19_200.0, "holding_total");
    assert_close(r.total_costs, 269_200.0, "total_costs");
    assert_close(r.total_invested, 1_019_200.0, "total_invested");
    assert_close(r.net_result, -19_200.0, "net_result");
    assert_close(r.return_percent, -19_200.0 / 1_019_200.0 * 100.0, "return_percent");
    assert!((r.return_percent + 1.8838).abs() < 1e-3);
    assert!((r.monthly_return_percent + 0.1584).abs() < 1e-3);

    assert_decomposition(&r);
}

#[test]
fn decomposition_holds_across_inputs() {
    let calc = AuctionCalculator::new(FixedRates::STANDARD);
    let bids = [0.0, 1.0, 123_456.78, 2_500_000.0];
    let markets = [0.0, 99_999.99, 1_000_000.0];
    let months = [0, 1, 7, 36];

    for &bid in &bids {
        for &market_value in &markets {
            for &m in &months {
                let s = AuctionScenario {
                    initial_bid: bid,
                    market_value,
                    months_to_sale: m,
                    sale_commission_percent: 6.0,
                    ..reference()
                };
                let r = calc.evaluate(&s);
                assert!(r.capital_gain >= 0.0);
                assert!(r.return_percent.is_finite());
                assert!(r.monthly_return_percent.is_finite());
                assert_decomposition(&r);
            }
        }
    }
}

#[test]
fn zero_total_invested_gives_zero_return() {
    let s = AuctionScenario {
        initial_bid: 0.0,
        market_value: 0.0,
        area_m2: 0.0,
        renovation_cost_per_m2: 0.0,
        monthly_property_tax: 0.0,
        monthly_condo_fee: 0.0,
        ..reference()
    };
    let r = evaluate(&s);
    assert_eq!(r.total_invested, 0.0);
    assert_eq!(r.return_percent, 0.0);
    assert_eq!(r.monthly_return_percent, 0.0);
}

#[test]
fn total_loss_gives_zero_monthly_return() {
    // Market value zero: the whole investment is lost.
    let s = AuctionScenario {
        market_value: 0.0,
        ..reference()
    };
    let r = evaluate(&s);
    assert_close(r.return_percent, -100.0, "return_percent");
    assert_eq!(r.monthly_return_percent, 0.0);
    assert_eq!(monthly_equivalent(-100.0, 12), 0.0);
}

#[test]
fn zero_month_horizon_gives_zero_monthly_return() {
    let s = AuctionScenario {
        months_to_sale: 0,
        ..reference()
    };
    let r = evaluate(&s);
    assert_eq!(r.holding_total, 0.0);
    assert_eq!(r.monthly_return_percent, 0.0);
    assert!(r.return_percent > 0.0);
}
