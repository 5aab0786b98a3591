//! AUCTION-SIM: judicial auction property investment simulator
//!
//! Entry point. Loads configuration, initialises structured logging,
//! applies command-line overrides, and runs the requested evaluation,
//! premium sweep, or comparable-price check.

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};

use auction_sim::calculator::sweep::DEFAULT_PREMIUMS;
use auction_sim::calculator::AuctionCalculator;
use auction_sim::cli::{Cli, Command};
use auction_sim::comparables::search::SearchApiSource;
use auction_sim::comparables::{ComparableEstimator, PriceSource};
use auction_sim::config::AppConfig;
use auction_sim::format::parse_premium_list;
use auction_sim::report;
use auction_sim::types::{AuctionScenario, FixedRates};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    init_logging();

    let mut cfg = AppConfig::load_or_default(&cli.config)?;
    cli.scenario.apply(&mut cfg);

    let scenario = cfg.scenario();
    scenario.validate().context("Invalid scenario")?;

    info!(scenario = %scenario, "Scenario loaded");

    let calculator = AuctionCalculator::new(FixedRates::STANDARD);

    match cli.command.clone().unwrap_or(Command::Evaluate) {
        Command::Evaluate => {
            let result = calculator.evaluate(&scenario);

            let comparables = match (cfg.comparables.enabled, cfg.scenario.address.as_deref()) {
                (true, Some(address)) => {
                    let estimator = build_estimator(&cfg)?;
                    Some(estimator.compare(address, scenario.market_value).await)
                }
                (true, None) => {
                    warn!("Comparables enabled but scenario.address is not set, skipping");
                    None
                }
                (false, _) => None,
            };

            if cli.json {
                let summary = comparables.as_ref().and_then(Option::as_ref);
                println!("{}", report::evaluation_json(&scenario, &result, summary)?);
            } else {
                print!("{}", report::render_evaluation(&scenario, &result, calculator.rates()));
                if let Some(summary) = &comparables {
                    println!();
                    print!("{}", report::render_comparables(summary.as_ref(), scenario.market_value));
                }
            }
        }

        Command::Sweep { premiums } => {
            let premiums = match premiums {
                Some(text) => parse_premium_list(&text).context("Invalid --premiums list")?,
                None => cfg.sweep.premiums.clone(),
            };
            let premiums = if premiums.is_empty() {
                DEFAULT_PREMIUMS.to_vec()
            } else {
                premiums
            };

            let rows = calculator.sweep(&scenario, &premiums);
            if cli.json {
                println!("{}", report::sweep_json(&scenario, &rows)?);
            } else {
                print!("{}", report::render_sweep(&rows));
            }
        }

        Command::Comparables { address } => {
            run_comparables(&cfg, &scenario, address, cli.json).await?;
        }
    }

    Ok(())
}

/// Look up comparable listings and print them against the market value.
async fn run_comparables(
    cfg: &AppConfig,
    scenario: &AuctionScenario,
    address: Option<String>,
    json: bool,
) -> Result<()> {
    let address = address
        .or_else(|| cfg.scenario.address.clone())
        .context("No address given: pass --address or set scenario.address in the config")?;

    let estimator = build_estimator(cfg)?;
    let summary = estimator.compare(&address, scenario.market_value).await;

    if json {
        println!("{}", report::comparables_json(scenario, summary.as_ref())?);
    } else {
        print!("{}", report::render_comparables(summary.as_ref(), scenario.market_value));
    }
    Ok(())
}

/// Wire up every price source that has credentials.
fn build_estimator(cfg: &AppConfig) -> Result<ComparableEstimator> {
    let c = &cfg.comparables;
    let mut sources: Vec<Box<dyn PriceSource>> = Vec::new();

    match SearchApiSource::from_env(&c.endpoint, &c.api_key_env, Duration::from_secs(c.timeout_secs))? {
        Some(source) => sources.push(Box::new(source)),
        None => warn!(
            env = %c.api_key_env,
            "No search API key configured, comparable search will find nothing"
        ),
    }

    Ok(ComparableEstimator::new(sources, c.bounds()))
}

/// Initialise the `tracing` subscriber.
///
/// Logs go to stderr so reports on stdout stay pipeable.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("auction_sim=info"));

    let json_logging = std::env::var("AUCTION_SIM_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
