//! Command-line interface.
//!
//! Amount and percentage flags accept locale-formatted text
//! (`--bid "500.000,00"`) and are parsed by the codec before anything
//! reaches the calculator.

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::format::parse_locale_number;
use crate::types::{AuctionError, OptionalRate};

#[derive(Parser, Debug)]
#[command(name = "auction-sim", version, about = "Judicial auction property investment simulator")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml", env = "AUCTION_SIM_CONFIG", global = true)]
    pub config: String,

    /// Emit JSON instead of the text report
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub scenario: ScenarioArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Evaluate the configured scenario (default)
    Evaluate,

    /// Compare the scenario across several premiums
    Sweep {
        /// Premiums separated by ';' or spaces, e.g. "10;20;32,5"
        #[arg(short, long)]
        premiums: Option<String>,
    },

    /// Check the market value against comparable listings
    Comparables {
        /// Free-text address; defaults to scenario.address from the config
        #[arg(short, long)]
        address: Option<String>,
    },
}

/// Per-run overrides of the `[scenario]` and `[fees]` config sections.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// Initial bid
    #[arg(long, global = true, value_parser = parse_amount)]
    pub bid: Option<f64>,

    /// Estimated resale value
    #[arg(long, global = true, value_parser = parse_amount)]
    pub market_value: Option<f64>,

    /// Area in m²
    #[arg(long, global = true, value_parser = parse_amount)]
    pub area: Option<f64>,

    /// Renovation cost per m²
    #[arg(long, global = true, value_parser = parse_amount)]
    pub renovation_per_m2: Option<f64>,

    /// Monthly property tax (IPTU)
    #[arg(long, global = true, value_parser = parse_amount)]
    pub property_tax: Option<f64>,

    /// Monthly condo fee
    #[arg(long, global = true, value_parser = parse_amount)]
    pub condo_fee: Option<f64>,

    /// Premium over the bid, in percent
    #[arg(long, global = true, value_parser = parse_amount)]
    pub premium: Option<f64>,

    /// Months until the resale
    #[arg(long, global = true)]
    pub months: Option<u32>,

    /// Enable legal advisory at this percent of the acquisition price
    #[arg(long, global = true, value_parser = parse_amount, conflicts_with = "no_advisory")]
    pub advisory: Option<f64>,

    /// Disable legal advisory
    #[arg(long, global = true)]
    pub no_advisory: bool,

    /// Enable a resale commission at this percent of market value
    #[arg(long, global = true, value_parser = parse_amount)]
    pub sale_commission: Option<f64>,
}

fn parse_amount(text: &str) -> Result<f64, AuctionError> {
    parse_locale_number(text)
}

impl ScenarioArgs {
    /// Overlay the flags that were given onto the loaded config.
    pub fn apply(&self, cfg: &mut AppConfig) {
        let s = &mut cfg.scenario;
        if let Some(v) = self.bid {
            s.initial_bid = v;
        }
        if let Some(v) = self.market_value {
            s.market_value = v;
        }
        if let Some(v) = self.area {
            s.area_m2 = v;
        }
        if let Some(v) = self.renovation_per_m2 {
            s.renovation_cost_per_m2 = v;
        }
        if let Some(v) = self.property_tax {
            s.monthly_property_tax = v;
        }
        if let Some(v) = self.condo_fee {
            s.monthly_condo_fee = v;
        }
        if let Some(v) = self.premium {
            s.premium_percent = v;
        }
        if let Some(v) = self.months {
            s.months_to_sale = v;
        }

        if self.no_advisory {
            cfg.fees.advisory = OptionalRate::disabled();
        } else if let Some(p) = self.advisory {
            cfg.fees.advisory = OptionalRate::enabled(p);
        }
        if let Some(p) = self.sale_commission {
            cfg.fees.sale_commission = OptionalRate::enabled(p);
        }
    }
}
