//! Tiered realtime quote resolution.
//!
//! Quote acquisition is an ordered list of tiers. Tier 1 hits the
//! machine-readable mobile price API; tier 2 scrapes the desktop quote page.
//! Each tier makes a single bounded-timeout attempt, and the next tier runs
//! only when the previous one errored, timed out, or returned an empty
//! payload. When every tier is exhausted the resolver yields `None` and the
//! caller falls back to the historical close.

use advisor_core::error::DataError;
use advisor_core::traits::{QuoteSource, QuoteTier};
use advisor_core::types::{QuoteMethod, QuoteStatus, RealtimeQuote};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; Mobile)";
const DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0.0.0 Safari/537.36";

/// Quote resolver configuration.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Mobile price API base
    pub api_base_url: String,
    /// Desktop quote page base
    pub web_base_url: String,
    pub timeout_secs: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://m.stock.naver.com".to_string(),
            web_base_url: "https://finance.naver.com".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Parse a locale-formatted number by stripping thousands separators.
fn parse_grouped(text: &str) -> Result<f64, DataError> {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| DataError::Parse(format!("not a number: {text:?}")))
}

/// One row of the mobile price API payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceRow {
    close_price: String,
    fluctuations_ratio: String,
    trading_volume: String,
}

/// Tier 1: mobile price API.
pub struct PriceApiTier {
    config: QuoteConfig,
    client: Client,
}

impl PriceApiTier {
    pub fn new(config: QuoteConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .user_agent(MOBILE_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }
}

/// Parse the price API payload: a list of daily rows, newest first.
fn parse_price_payload(body: &str) -> Result<RealtimeQuote, DataError> {
    let rows: Vec<PriceRow> =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    // An empty list is a tier failure, not a quote of zero.
    let today = rows
        .into_iter()
        .next()
        .ok_or_else(|| DataError::Parse("empty price payload".to_string()))?;

    Ok(RealtimeQuote {
        price: parse_grouped(&today.close_price)?,
        rate: parse_grouped(&today.fluctuations_ratio)?,
        volume: parse_grouped(&today.trading_volume)? as u64,
        // The API carries no market-state flag; data present is treated as
        // an open market.
        status: QuoteStatus::Open,
        method: QuoteMethod::Primary,
    })
}

#[async_trait]
impl QuoteTier for PriceApiTier {
    async fn fetch(&self, code: &str) -> Result<RealtimeQuote, DataError> {
        let url = format!(
            "{}/api/stock/{}/price?count=1&page=1",
            self.config.api_base_url, code
        );

        let body = self
            .client
            .get(&url)
            .header("Referer", format!("{}/", self.config.api_base_url))
            .send()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?
            .error_for_status()
            .map_err(|e| DataError::Connection(e.to_string()))?
            .text()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        parse_price_payload(&body)
    }

    fn name(&self) -> &str {
        "price-api"
    }
}

/// Tier 2: desktop quote page scrape.
pub struct HtmlQuoteTier {
    config: QuoteConfig,
    client: Client,
}

impl HtmlQuoteTier {
    pub fn new(config: QuoteConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }
}

fn selector(css: &str) -> Result<Selector, DataError> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("selector {css:?}: {e}")))
}

fn node_text(document: &Html, sel: &Selector) -> Option<String> {
    document
        .select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Extract a quote from the desktop page markup.
fn extract_quote(html: &str) -> Result<RealtimeQuote, DataError> {
    let document = Html::parse_document(html);

    let price_text = node_text(&document, &selector(".no_today .blind")?)
        .ok_or_else(|| DataError::Parse("price node not found".to_string()))?;
    let price = parse_grouped(&price_text)?;

    // The change node mixes absolute and percent figures; pick the percent.
    let mut rate = 0.0;
    if let Some(exday) = node_text(&document, &selector(".no_exday")?) {
        let pattern =
            Regex::new(r"([+-]?\d+\.\d+)%").map_err(|e| DataError::Parse(e.to_string()))?;
        if let Some(captures) = pattern.captures(&exday) {
            rate = captures[1]
                .parse::<f64>()
                .map_err(|e| DataError::Parse(e.to_string()))?;
            // The page may render the magnitude unsigned; the direction icon
            // is authoritative.
            if rate > 0.0 && document.select(&selector(".ico_down")?).next().is_some() {
                rate = -rate;
            }
        }
    }

    let volume = node_text(&document, &selector(".no_info .blind")?)
        .and_then(|text| parse_grouped(&text).ok())
        .map(|v| v as u64)
        .unwrap_or(0);

    Ok(RealtimeQuote {
        price,
        rate,
        volume,
        status: QuoteStatus::Open,
        method: QuoteMethod::Fallback,
    })
}

#[async_trait]
impl QuoteTier for HtmlQuoteTier {
    async fn fetch(&self, code: &str) -> Result<RealtimeQuote, DataError> {
        let url = format!("{}/item/main.naver?code={}", self.config.web_base_url, code);

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?
            .error_for_status()
            .map_err(|e| DataError::Connection(e.to_string()))?
            .text()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        extract_quote(&body)
    }

    fn name(&self) -> &str {
        "html-scrape"
    }
}

/// Quote resolution over an ordered tier list.
pub struct QuoteResolver {
    tiers: Vec<Box<dyn QuoteTier>>,
}

impl QuoteResolver {
    /// Compose a resolver from explicit tiers (first tier tried first).
    pub fn new(tiers: Vec<Box<dyn QuoteTier>>) -> Self {
        Self { tiers }
    }

    /// The standard two-tier stack: price API, then page scrape.
    pub fn standard(config: QuoteConfig) -> Result<Self, DataError> {
        Ok(Self::new(vec![
            Box::new(PriceApiTier::new(config.clone())?),
            Box::new(HtmlQuoteTier::new(config)?),
        ]))
    }
}

#[async_trait]
impl QuoteSource for QuoteResolver {
    async fn resolve(&self, code: &str) -> Option<RealtimeQuote> {
        for tier in &self.tiers {
            match tier.fetch(code).await {
                Ok(quote) => {
                    debug!(tier = tier.name(), price = quote.price, "quote resolved");
                    return Some(quote);
                }
                Err(e) => {
                    warn!(tier = tier.name(), error = %e, "quote tier failed");
                }
            }
        }

        warn!("all quote tiers exhausted");
        None
    }
}
