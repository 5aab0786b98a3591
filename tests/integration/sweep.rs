//! Premium sweep properties.

use auction_sim::calculator::sweep::{sweep, DEFAULT_PREMIUMS};
use auction_sim::calculator::{evaluate, AuctionCalculator};
use auction_sim::report::render_sweep;
use auction_sim::types::AuctionScenario;

fn base() -> AuctionScenario {
    AuctionScenario {
        initial_bid: 320_000.0,
        market_value: 610_000.0,
        area_m2: 72.0,
        renovation_cost_per_m2: 850.0,
        monthly_property_tax: 210.0,
        monthly_condo_fee: 780.0,
        premium_percent: 0.0,
        sale_commission_percent: 5.0,
        advisory_fee_percent: 6.0,
        months_to_sale: 9,
    }
}

#[test]
fn output_matches_input_premiums() {
    let premiums = [80.0, 10.0, 10.0, 45.5, 0.0];
    let rows = AuctionCalculator::default().sweep(&base(), &premiums);

    assert_eq!(rows.len(), premiums.len());
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.premium_percent, premiums[i]);
        assert_eq!(row.result, evaluate(&base().with_premium(premiums[i])));
    }
}

#[test]
fn default_list_when_none_given() {
    let rows = sweep(&base(), None);
    assert_eq!(rows.len(), 8);
    assert_eq!(rows.first().map(|r| r.premium_percent), Some(10.0));
    assert_eq!(rows.last().map(|r| r.premium_percent), Some(80.0));
    assert_eq!(DEFAULT_PREMIUMS, &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0]);
}

#[test]
fn row_count_tracks_supplied_list() {
    for premiums in [&[][..], &[30.0][..], &[30.0, 30.0, 30.0][..]] {
        assert_eq!(sweep(&base(), Some(premiums)).len(), premiums.len());
    }
}

#[test]
fn sweep_does_not_touch_base() {
    let b = base();
    let _ = sweep(&b, Some(&[25.0, 50.0][..]));
    assert_eq!(b, base());
}

#[test]
fn negative_premium_is_not_rejected() {
    // Validation belongs to the caller; the calculator just computes.
    let rows = sweep(&base(), Some(&[-10.0][..]));
    assert!((rows[0].result.acquisition_price - 288_000.0).abs() < 1e-6);
}

#[test]
fn rendered_table_lists_every_row() {
    let rows = sweep(&base(), None);
    let table = render_sweep(&rows);
    assert_eq!(table.lines().count(), rows.len() + 1);
    assert!(table.contains("80,0%"));
}
