//! Gateway to the external generative text service. One request per call,
//! no internal retry; the orchestrator decides whether to surface or retry.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{json, Value};

use crate::config::GeminiConfig;

/// Fixed generation parameters. Treated as constants of the integration,
/// not tunable per call.
const TEMPERATURE: f64 = 0.7;
const TOP_K: u64 = 40;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u64 = 1024;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid endpoint configuration: {0}")]
    InvalidEndpoint(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("generation request failed with status {0}")]
    Status(u16),
    #[error("could not decode generation response")]
    Decode,
    #[error("generation response contained no candidate text")]
    EmptyResponse,
}

/// Capability seam for text generation so the engine can run against a
/// deterministic stub instead of a live network dependency.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            config: config.clone(),
            client,
        }
    }

    fn endpoint(&self) -> Result<Url, GatewayError> {
        if self.config.api_url.is_empty() {
            return Err(GatewayError::InvalidEndpoint("api_url is empty".into()));
        }
        if self.config.api_key.is_empty() {
            return Err(GatewayError::InvalidEndpoint("api_key is empty".into()));
        }
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| GatewayError::InvalidEndpoint(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url)
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "topK": TOP_K,
                "topP": TOP_P,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            }
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let url = self.endpoint()?;

        tracing::debug!(prompt_len = prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(url)
            .json(&Self::request_body(prompt))
            .send()
            .await
            // without_url keeps the API key out of error text and logs.
            .map_err(|e| GatewayError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Generation request rejected");
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|_| GatewayError::Decode)?;
        let text = extract_candidate_text(&body).ok_or(GatewayError::EmptyResponse)?;

        tracing::debug!(response_len = text.len(), "Generation request succeeded");
        Ok(text)
    }
}

/// First candidate's first text part; any other response shape is treated
/// as an empty output.
pub(crate) fn extract_candidate_text(body: &Value) -> Option<String> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
}

/// Canned generator selected by `GEMINI_MOCK`, so the pipeline runs end to
/// end without a key. Also handy for local smoke testing.
pub struct MockGenerator;

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
        Ok("\
SUGGESTION_1:
Type: practice
Priority: high
Title: Dynamic Programming - Classic Problems
Description: Build depth in dp before moving up a difficulty band.
Action: Practice Now
URL: https://codeforces.com/problemset?tags=dp

SUGGESTION_2:
Type: improvement
Priority: medium
Title: Graph Theory - DFS/BFS
Description: Your graph tag count is low for your rating range.
Action: Study Topic
URL: https://codeforces.com/problemset?tags=graphs

SUGGESTION_3:
Type: contest
Priority: medium
Title: Virtual Contest Practice
Description: Simulate contest pressure with a recent Div 2 round.
Action: Join Contest
URL: none
"
        .to_string())
    }
}
