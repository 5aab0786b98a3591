//! Report rendering.
//!
//! Turns calculator output into the text summary printed by the CLI, or
//! into pretty JSON when machine-readable output is requested. All
//! rounding happens here, never in the calculator.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::format::{format_currency, format_locale_number, format_percent};
use crate::types::{AuctionScenario, ComparableSummary, FixedRates, ScenarioResult, SweepRow};

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Full breakdown of a single evaluation.
pub fn render_evaluation(
    scenario: &AuctionScenario,
    result: &ScenarioResult,
    rates: &FixedRates,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_evaluation(&mut out, scenario, result, rates);
    out
}

fn write_evaluation(
    out: &mut String,
    scenario: &AuctionScenario,
    r: &ScenarioResult,
    rates: &FixedRates,
) -> std::fmt::Result {
    writeln!(out, "Auction Simulation Summary")?;
    writeln!(out, "==========================")?;
    writeln!(out, "Initial bid:               {}", format_currency(scenario.initial_bid))?;
    writeln!(out, "Premium over bid:          {}", format_percent(scenario.premium_percent, 1))?;
    writeln!(out, "Acquisition price:         {}", format_currency(r.acquisition_price))?;
    writeln!(out, "Market sale value:         {}", format_currency(r.market_value))?;
    writeln!(out, "Area:                      {} m²", format_locale_number(scenario.area_m2, 2))?;
    writeln!(out)?;

    writeln!(out, "Taxes and registration")?;
    writeln!(
        out,
        "  Capital gains tax:       {} ({})",
        format_currency(r.capital_gains_tax),
        format_percent(rates.capital_gains_tax_percent, 0)
    )?;
    writeln!(
        out,
        "  Transfer tax:            {} ({})",
        format_currency(r.transfer_tax),
        format_percent(rates.transfer_tax_percent, 0)
    )?;
    writeln!(
        out,
        "  Registration:            {} ({})",
        format_currency(r.registration_fee),
        format_percent(rates.registration_fee_percent, 0)
    )?;
    writeln!(out, "  Total:                   {}", format_currency(r.tax_total))?;
    writeln!(out)?;

    writeln!(out, "Auctioneer and legal advisory")?;
    writeln!(
        out,
        "  Auctioneer commission:   {} ({})",
        format_currency(r.auctioneer_commission),
        format_percent(rates.auctioneer_commission_percent, 0)
    )?;
    writeln!(
        out,
        "  Legal advisory:          {} ({})",
        format_currency(r.advisory_fee),
        format_percent(scenario.advisory_fee_percent, 0)
    )?;
    writeln!(out, "  Total:                   {}", format_currency(r.fee_total))?;
    writeln!(out)?;

    // No cost component beyond renovation, so "Other" is always zero.
    writeln!(out, "After taking possession")?;
    writeln!(out, "  Renovation:              {}", format_currency(r.renovation_cost))?;
    writeln!(out, "  Other:                   {}", format_currency(0.0))?;
    writeln!(out, "  Total:                   {}", format_currency(r.renovation_cost))?;
    writeln!(out)?;

    writeln!(out, "Monthly costs until sale ({} months)", r.months_to_sale)?;
    writeln!(
        out,
        "  Property tax:            {}/month -> {}",
        format_currency(scenario.monthly_property_tax),
        format_currency(r.property_tax_total)
    )?;
    writeln!(
        out,
        "  Condo fee:               {}/month -> {}",
        format_currency(scenario.monthly_condo_fee),
        format_currency(r.condo_fee_total)
    )?;
    writeln!(out, "  Total:                   {}", format_currency(r.holding_total))?;
    writeln!(out)?;

    writeln!(
        out,
        "Sale commission:           {} ({})",
        format_currency(r.sale_commission),
        format_percent(scenario.sale_commission_percent, 1)
    )?;
    writeln!(out)?;

    writeln!(out, "Final summary")?;
    writeln!(out, "  Total costs:             {}", format_currency(r.total_costs))?;
    writeln!(out, "  Total invested:          {}", format_currency(r.total_invested))?;
    writeln!(out, "  Sale value:              {}", format_currency(r.market_value))?;
    writeln!(
        out,
        "  Investor result:         {} ({})",
        format_currency(r.net_result),
        format_percent(r.return_percent, 1)
    )?;
    writeln!(
        out,
        "  Monthly equivalent:      {} per month",
        format_percent(r.monthly_return_percent, 2)
    )?;
    Ok(())
}

/// Side-by-side comparison table of a premium sweep.
pub fn render_sweep(rows: &[SweepRow]) -> String {
    let mut out = String::new();
    let _ = write_sweep(&mut out, rows);
    out
}

fn write_sweep(out: &mut String, rows: &[SweepRow]) -> std::fmt::Result {
    writeln!(
        out,
        "{:>8}  {:>18}  {:>18}  {:>18}  {:>9}  {:>9}",
        "Premium", "Acquisition", "Total invested", "Net result", "Return", "Monthly"
    )?;
    for row in rows {
        let r = &row.result;
        writeln!(
            out,
            "{:>8}  {:>18}  {:>18}  {:>18}  {:>9}  {:>9}",
            format_percent(row.premium_percent, 1),
            format_currency(r.acquisition_price),
            format_currency(r.total_invested),
            format_currency(r.net_result),
            format_percent(r.return_percent, 1),
            format_percent(r.monthly_return_percent, 2),
        )?;
    }
    Ok(())
}

/// Comparable listings versus the declared market value.
pub fn render_comparables(summary: Option<&ComparableSummary>, market_value: f64) -> String {
    let mut out = String::new();
    let _ = write_comparables(&mut out, summary, market_value);
    out
}

fn write_comparables(
    out: &mut String,
    summary: Option<&ComparableSummary>,
    market_value: f64,
) -> std::fmt::Result {
    let Some(s) = summary else {
        return writeln!(out, "No comparable prices found.");
    };

    writeln!(out, "Comparable listings:       {}", s.count)?;
    writeln!(out, "  Average price:           {}", format_currency(s.average))?;
    writeln!(
        out,
        "  Range:                   {} - {}",
        format_currency(s.min),
        format_currency(s.max)
    )?;
    writeln!(out, "  Declared market value:   {}", format_currency(market_value))?;
    match s.delta_percent {
        Some(delta) => writeln!(out, "  Average vs declared:     {}", format_percent(delta, 1)),
        None => writeln!(out, "  Average vs declared:     n/a"),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonReport<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    scenario: &'a AuctionScenario,
    #[serde(flatten)]
    body: T,
}

#[derive(Serialize)]
struct EvaluationBody<'a> {
    result: &'a ScenarioResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparables: Option<&'a ComparableSummary>,
}

#[derive(Serialize)]
struct SweepBody<'a> {
    rows: &'a [SweepRow],
}

#[derive(Serialize)]
struct ComparablesBody<'a> {
    comparables: Option<&'a ComparableSummary>,
}

fn to_json<T: Serialize>(scenario: &AuctionScenario, body: T) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        scenario,
        body,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialise report")
}

/// Evaluation report; `comparables` is included only when a summary exists.
pub fn evaluation_json(
    scenario: &AuctionScenario,
    result: &ScenarioResult,
    comparables: Option<&ComparableSummary>,
) -> Result<String> {
    to_json(scenario, EvaluationBody { result, comparables })
}

pub fn sweep_json(scenario: &AuctionScenario, rows: &[SweepRow]) -> Result<String> {
    to_json(scenario, SweepBody { rows })
}

pub fn comparables_json(
    scenario: &AuctionScenario,
    summary: Option<&ComparableSummary>,
) -> Result<String> {
    to_json(scenario, ComparablesBody { comparables: summary })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
