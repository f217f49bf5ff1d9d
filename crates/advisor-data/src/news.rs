//! News headline collector.
//!
//! The news listing page is served in a legacy encoding, so the body is
//! decoded using the response's declared charset before parsing. Every
//! failure mode yields an empty list; news is never fatal.

use advisor_core::error::DataError;
use advisor_core::traits::HeadlineSource;
use async_trait::async_trait;
use encoding_rs::{Encoding, EUC_KR};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// News collector configuration.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub base_url: String,
    /// Maximum headlines returned, most recent first.
    pub max_headlines: usize,
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://finance.naver.com".to_string(),
            max_headlines: 5,
            timeout_secs: 5,
        }
    }
}

/// News headline collector.
pub struct NewsCollector {
    config: NewsConfig,
    client: Client,
}

impl NewsCollector {
    pub fn new(config: NewsConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    async fn try_fetch(&self, code: &str) -> Result<Vec<String>, reqwest::Error> {
        let url = format!(
            "{}/item/news_news.naver?code={}",
            self.config.base_url, code
        );

        let response = self
            .client
            .get(&url)
            .header(
                "Referer",
                format!("{}/item/main.naver?code={}", self.config.base_url, code),
            )
            .send()
            .await?
            .error_for_status()?;

        let charset = charset_from_content_type(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        let bytes = response.bytes().await?;
        let html = decode_body(&bytes, charset.as_deref());

        Ok(parse_headlines(&html, self.config.max_headlines))
    }
}

#[async_trait]
impl HeadlineSource for NewsCollector {
    async fn headlines(&self, code: &str) -> Vec<String> {
        match self.try_fetch(code).await {
            Ok(headlines) => {
                debug!(count = headlines.len(), "headlines collected");
                headlines
            }
            Err(e) => {
                warn!(error = %e, "news fetch failed, continuing without headlines");
                Vec::new()
            }
        }
    }
}

/// Pull the charset parameter out of a Content-Type header value.
fn charset_from_content_type(content_type: Option<&str>) -> Option<String> {
    content_type?
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("charset="))
        .map(|cs| cs.trim_matches('"').to_string())
}

/// Decode the body with the declared charset, defaulting to EUC-KR, which
/// is what the source serves when it declares nothing.
fn decode_body(bytes: &[u8], charset: Option<&str>) -> String {
    let encoding = charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(EUC_KR);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Select headline anchors, newest first.
fn parse_headlines(html: &str, max: usize) -> Vec<String> {
    let Ok(anchor) = Selector::parse("a.tit") else {
        return Vec::new();
    };

    Html::parse_document(html)
        .select(&anchor)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .take(max)
        .collect()
}
