//! Configuration structures.

use advisor_indicators::IndicatorConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub quote: QuoteSettings,
    #[serde(default)]
    pub news: NewsSettings,
    #[serde(default)]
    pub judge: JudgeSettings,
    #[serde(default)]
    pub strategy: StrategySettings,
    #[serde(default)]
    pub indicators: IndicatorConfig,
    #[serde(default)]
    pub symbols: SymbolSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Chart history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    pub base_url: String,
    pub range: String,
    pub interval: String,
    pub symbol_suffix: String,
    pub timeout_secs: u64,
}

impl Default for HistorySettings {
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

/// Realtime quote settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSettings {
    pub api_base_url: String,
    pub web_base_url: String,
    pub timeout_secs: u64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://m.stock.naver.com".to_string(),
            web_base_url: "https://finance.naver.com".to_string(),
            timeout_secs: 5,
        }
    }
}

/// News collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSettings {
    pub base_url: String,
    pub max_headlines: usize,
    pub timeout_secs: u64,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://finance.naver.com".to_string(),
            max_headlines: 5,
            timeout_secs: 5,
        }
    }
}

/// Judge (reasoning service) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeSettings {
    pub api_key_env: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for JudgeSettings {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            model: "gemma-3-27b-it".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Strategy selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySettings {
    /// Strategy used when the CLI does not select one.
    pub default: String,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            default: "volatility_breakout".to_string(),
        }
    }
}

/// Symbol table settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SymbolSettings {
    /// Path to the exchange listing CSV. When absent, only direct code
    /// queries resolve.
    pub listing_path: Option<String>,
}
