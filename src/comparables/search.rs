//! Web-search price source.
//!
//! Queries a SerpApi-compatible JSON search endpoint for listings near an
//! address and pulls `R$` amounts out of result titles and snippets.
//!
//! API: `https://serpapi.com/search.json`
//! Auth: API key via `api_key` query param, read from the environment.
//! One attempt per estimation; no retries.

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

use super::PriceSource;
use crate::config::AppConfig;
use crate::format::parse_locale_number;
use crate::types::AuctionError;

pub const DEFAULT_ENDPOINT: &str = "https://serpapi.com/search.json";

// ---------------------------------------------------------------------------
// Price extraction
// ---------------------------------------------------------------------------

static PRICE_RE: OnceLock<Regex> = OnceLock::new();

fn price_regex() -> &'static Regex {
    PRICE_RE.get_or_init(|| {
        Regex::new(r"R\$\s*(\d{1,3}(?:\.\d{3})+(?:,\d{1,2})?|\d+(?:,\d{1,2})?)")
            .unwrap()
    })
}

/// Every `R$` amount in `text`, in order of appearance.
pub fn extract_prices(text: &str) -> Vec<f64> {
    price_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| parse_locale_number(m.as_str()).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

fn prices_from_response(resp: &SearchResponse) -> Vec<f64> {
    resp.organic_results
        .iter()
        .flat_map(|r| [r.title.as_deref(), r.snippet.as_deref()])
        .flatten()
        .flat_map(extract_prices)
        .collect()
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

pub struct SearchApiSource {
    http: Client,
    endpoint: String,
    api_key: SecretString,
}

impl SearchApiSource {
    pub fn new(endpoint: &str, api_key: SecretString, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("auction-sim/0.1.0")
            .build()
            .context("Failed to build search HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build from the key stored in `api_key_env`.
    /// Returns `None` when the variable is unset or empty.
    pub fn from_env(endpoint: &str, api_key_env: &str, timeout: Duration) -> Result<Option<Self>> {
        match AppConfig::resolve_env(api_key_env) {
            Ok(key) => Ok(Some(Self::new(endpoint, SecretString::new(key), timeout)?)),
            Err(e) => {
                debug!(error = %e, "Search source disabled");
                Ok(None)
            }
        }
    }

    fn query_for(address: &str) -> String {
        format!("{address} imóvel à venda preço")
    }

    fn request_url(&self, address: &str) -> String {
        format!(
            "{}?engine=google&hl=pt-br&gl=br&q={}&api_key={}",
            self.endpoint,
            urlencoding::encode(&Self::query_for(address)),
            urlencoding::encode(self.api_key.expose_secret()),
        )
    }

    async fn query(&self, address: &str) -> Result<Vec<f64>> {
        let resp = self
            .http
            .get(self.request_url(address))
            .send()
            .await
            .context("Search request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("Search API error: {status}");
        }

        let data: SearchResponse = resp
            .json()
            .await
            .context("Failed to parse search response")?;

        if let Some(err) = data.error.as_deref() {
            anyhow::bail!("Search API rejected query: {err}");
        }

        let prices = prices_from_response(&data);
        debug!(
            results = data.organic_results.len(),
            prices = prices.len(),
            "Search results parsed"
        );
        Ok(prices)
    }
}

#[async_trait]
impl PriceSource for SearchApiSource {
    async fn fetch_prices(&self, address: &str) -> Result<Vec<f64>> {
        self.query(address).await.map_err(|e| {
            AuctionError::PriceSource {
                source_name: self.name().to_string(),
                message: format!("{e:#}"),
            }
            .into()
        })
    }

    fn name(&self) -> &'static str {
        "search"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
