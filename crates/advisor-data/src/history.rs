//! Daily chart history source.
//!
//! Fetches the chart JSON payload for a symbol and normalizes it into a
//! `BarSeries`: timestamps ascending, duplicate dates dropped, and the
//! adjusted close promoted to `close` when the unadjusted column is absent.

use advisor_core::error::DataError;
use advisor_core::traits::HistorySource;
use advisor_core::types::{Bar, BarSeries};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Chart source configuration.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub base_url: String,
    /// Lookback window, e.g. "1y"
    pub range: String,
    /// Bar interval, e.g. "1d"
    pub interval: String,
    /// Exchange suffix appended to the code, e.g. ".KS"
    pub symbol_suffix: String,
    pub timeout_secs: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            range: "1y".to_string(),
            interval: "1d".to_string(),
            symbol_suffix: ".KS".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Chart API response envelope.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteColumns>,
    adjclose: Option<Vec<AdjCloseColumn>>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseColumn {
    adjclose: Option<Vec<Option<f64>>>,
}

/// Chart API history client.
pub struct ChartClient {
    config: ChartConfig,
    client: Client,
}

impl ChartClient {
    /// Create a new chart client.
    pub fn new(config: ChartConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl HistorySource for ChartClient {
    async fn fetch_daily(&self, code: &str) -> Result<BarSeries, DataError> {
        let symbol = format!("{}{}", code, self.config.symbol_suffix);
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.config.base_url, symbol, self.config.range, self.config.interval
        );
        debug!(%symbol, "fetching chart history");

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

        parse_chart(&symbol, &body)
    }

    fn name(&self) -> &str {
        "chart-api"
    }
}

/// Normalize a chart payload into a bar series.
fn parse_chart(symbol: &str, body: &str) -> Result<BarSeries, DataError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    let result = response
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or(DataError::EmptySeries)?;

    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Err(DataError::EmptySeries);
    }

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .and_then(|mut a| if a.is_empty() { None } else { a.remove(0).adjclose });

    // A payload with neither a close nor an adjusted-close column cannot
    // yield bars at all.
    if quote.close.is_none() && adjclose.is_none() {
        return Err(DataError::SchemaError(
            "no close-equivalent field in payload".to_string(),
        ));
    }

    let cell = |column: &Option<Vec<Option<f64>>>, i: usize| -> Option<f64> {
        column.as_ref().and_then(|v| v.get(i).copied().flatten())
    };

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        // Promote the adjusted close when the unadjusted cell is missing.
        let close = match cell(&quote.close, i).or_else(|| cell(&adjclose, i)) {
            Some(c) => c,
            None => continue,
        };

        bars.push(Bar::new(
            ts * 1000,
            cell(&quote.open, i).unwrap_or(close),
            cell(&quote.high, i).unwrap_or(close),
            cell(&quote.low, i).unwrap_or(close),
            close,
            cell(&quote.volume, i).unwrap_or(0.0),
        ));
    }

    if bars.is_empty() {
        return Err(DataError::EmptySeries);
    }

    Ok(BarSeries::from_bars(symbol.to_string(), bars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_normalizes_rows() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [86400, 172800, 259200],
                    "indicators": {
                        "quote": [{
                            "open": [100.0, 101.0, 102.0],
                            "high": [101.0, 102.0, 103.0],
                            "low": [99.0, 100.0, 101.0],
                            "close": [100.5, 101.5, 102.5],
                            "volume": [1000.0, 2000.0, 3000.0]
                        }]
                    }
                }]
            }
        }"#;

        let series = parse_chart("TEST.KS", body).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![100.5, 101.5, 102.5]);
        assert_eq!(series.symbol, "TEST.KS");
    }

    #[test]
    fn test_parse_chart_promotes_adjclose() {
        // No close column at all; the adjusted close substitutes.
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [86400, 172800],
                    "indicators": {
                        "quote": [{
                            "open": [100.0, 101.0],
                            "high": [101.0, 102.0],
                            "low": [99.0, 100.0],
                            "volume": [1000.0, 2000.0]
                        }],
                        "adjclose": [{"adjclose": [99.5, 100.5]}]
                    }
                }]
            }
        }"#;

        let series = parse_chart("TEST.KS", body).unwrap();

        assert_eq!(series.closes(), vec![99.5, 100.5]);
    }

    #[test]
    fn test_parse_chart_fills_null_close_cells_from_adjclose() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [86400, 172800],
                    "indicators": {
                        "quote": [{
                            "close": [100.5, null]
                        }],
                        "adjclose": [{"adjclose": [100.0, 101.0]}]
                    }
                }]
            }
        }"#;

        let series = parse_chart("TEST.KS", body).unwrap();

        assert_eq!(series.closes(), vec![100.5, 101.0]);
    }

    #[test]
    fn test_parse_chart_empty_result_is_empty_series() {
        let body = r#"{"chart": {"result": []}}"#;

        assert!(matches!(
            parse_chart("TEST.KS", body),
            Err(DataError::EmptySeries)
        ));
    }

    #[test]
    fn test_parse_chart_no_close_equivalent_is_schema_error() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [86400],
                    "indicators": {
                        "quote": [{
                            "open": [100.0],
                            "high": [101.0],
                            "low": [99.0],
                            "volume": [1000.0]
                        }]
                    }
                }]
            }
        }"#;

        assert!(matches!(
            parse_chart("TEST.KS", body),
            Err(DataError::SchemaError(_))
        ));
    }

    #[test]
    fn test_parse_chart_skips_fully_null_rows() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [86400, 172800],
                    "indicators": {
                        "quote": [{
                            "close": [null, 101.5]
                        }]
                    }
                }]
            }
        }"#;

        let series = parse_chart("TEST.KS", body).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.closes(), vec![101.5]);
    }
}
