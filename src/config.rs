//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section is optional and falls back to defaults. Secrets (the
//! search API key) are referenced by env-var name in the config and
//! resolved at runtime via [`AppConfig::resolve_env`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::calculator::sweep::DEFAULT_PREMIUMS;
use crate::comparables::search::DEFAULT_ENDPOINT;
use crate::comparables::PriceBounds;
use crate::types::{AuctionError, AuctionScenario, OptionalRate};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scenario: ScenarioConfig,
    pub fees: FeesConfig,
    pub sweep: SweepConfig,
    pub comparables: ComparablesConfig,
}

/// Scenario inputs. Optional fees live in [`FeesConfig`].
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScenarioConfig {
    pub initial_bid: f64,
    pub market_value: f64,
    pub area_m2: f64,
    pub renovation_cost_per_m2: f64,
    pub monthly_property_tax: f64,
    pub monthly_condo_fee: f64,
    pub premium_percent: f64,
    pub months_to_sale: u32,
    /// Free-text address used for the comparable-price search.
    pub address: Option<String>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let base = AuctionScenario::default();
        Self {
            initial_bid: base.initial_bid,
            market_value: base.market_value,
            area_m2: base.area_m2,
            renovation_cost_per_m2: base.renovation_cost_per_m2,
            monthly_property_tax: base.monthly_property_tax,
            monthly_condo_fee: base.monthly_condo_fee,
            premium_percent: base.premium_percent,
            months_to_sale: base.months_to_sale,
            address: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeesConfig {
    pub advisory: OptionalRate,
    pub sale_commission: OptionalRate,
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            advisory: OptionalRate::advisory_default(),
            sale_commission: OptionalRate::disabled(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SweepConfig {
    pub premiums: Vec<f64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            premiums: DEFAULT_PREMIUMS.to_vec(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ComparablesConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for ComparablesConfig {
    fn default() -> Self {
        let bounds = PriceBounds::default();
        Self {
            enabled: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: "SERPAPI_API_KEY".to_string(),
            timeout_secs: 15,
            min_price: bounds.min_price,
            max_price: bounds.max_price,
        }
    }
}

impl ComparablesConfig {
    pub fn bounds(&self) -> PriceBounds {
        PriceBounds {
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path`, or use defaults when the file does not exist.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// The scenario described by `[scenario]` and `[fees]`.
    pub fn scenario(&self) -> AuctionScenario {
        let s = &self.scenario;
        AuctionScenario {
            initial_bid: s.initial_bid,
            market_value: s.market_value,
            area_m2: s.area_m2,
            renovation_cost_per_m2: s.renovation_cost_per_m2,
            monthly_property_tax: s.monthly_property_tax,
            monthly_condo_fee: s.monthly_condo_fee,
            premium_percent: s.premium_percent,
            sale_commission_percent: self.fees.sale_commission.effective_percent(),
            advisory_fee_percent: self.fees.advisory.effective_percent(),
            months_to_sale: s.months_to_sale,
        }
    }

    /// Value of the secret named by `env_name`. Unset and blank both
    /// count as missing.
    pub fn resolve_env(env_name: &str) -> Result<String, AuctionError> {
        match std::env::var(env_name) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            Ok(_) => Err(AuctionError::Config(format!(
                "Environment variable is empty: {env_name}"
            ))),
            Err(_) => Err(AuctionError::Config(format!(
                "Environment variable not set: {env_name}"
            ))),
        }
    }
}
