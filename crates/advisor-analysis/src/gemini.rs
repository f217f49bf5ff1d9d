//! Reasoning-service client over a generative-language REST endpoint.

use advisor_core::error::JudgeError;
use advisor_core::traits::Judge;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Judge client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            model: "gemma-3-27b-it".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

/// Generative-language judge client.
///
/// The API key is resolved from the environment at construction; a missing
/// key is reported as a connection failure at call time so the pipeline can
/// substitute its fallback decision instead of refusing to start.
pub struct GeminiClient {
    config: GeminiConfig,
    api_key: Option<String>,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, JudgeError> {
        let api_key = std::env::var(&config.api_key_env).ok();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| JudgeError::Connection(e.to_string()))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl Judge for GeminiClient {
    async fn judge(&self, prompt: &str) -> Result<String, JudgeError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            JudgeError::Connection(format!("{} not set", self.config.api_key_env))
        })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.config.model, "submitting judgment request");
        let response: GenerateResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| JudgeError::Connection(e.to_string()))?
            .error_for_status()
            .map_err(|e| JudgeError::Connection(e.to_string()))?
            .json()
            .await
            .map_err(|e| JudgeError::MalformedReply(e.to_string()))?;

        let text = response
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .and_then(|candidate| candidate.content.parts)
            .and_then(|mut p| if p.is_empty() { None } else { Some(p.remove(0)) })
            .map(|part| part.text)
            .ok_or_else(|| JudgeError::MalformedReply("no candidate text".to_string()))?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_is_connection_failure() {
        let client = GeminiClient::new(GeminiConfig {
            api_key_env: "ADVISOR_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        })
        .unwrap();

        let result = client.judge("prompt").await;

        assert!(matches!(result, Err(JudgeError::Connection(_))));
    }
}
