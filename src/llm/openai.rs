//! `OpenAI`-compatible chat completions client (x.ai speaks the same protocol)

use super::types::{provider_error_message, CompletionRequest};
use super::{CompletionService, LlmError};
use crate::config::RelayConfig;
use crate::system_prompt::COOKING_PERSONA;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Stateless client for a single chat completions endpoint
pub struct CompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl CompletionClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, LlmError> {
        Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.base_url.clone(),
            config.model.clone(),
            config.request_timeout,
        )
    }

    fn build_request(&self, user_text: &str) -> CompletionRequest {
        CompletionRequest::persona(COOKING_PERSONA, user_text, &self.model)
    }
}

#[async_trait]
impl CompletionService for CompletionClient {
    async fn complete(&self, user_text: &str) -> Result<Value, LlmError> {
        let request = self.build_request(user_text);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::transport(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::transport(format!("Connection failed: {e}"))
                } else {
                    LlmError::transport(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let mut err = LlmError::upstream(status.as_u16(), provider_error_message(&body));
            if let Some(delay) = retry_after {
                err = err.with_retry_after(delay);
            }
            return Err(err);
        }

        serde_json::from_str(&body)
            .map_err(|e| LlmError::malformed(format!("Failed to parse response: {e}")))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// `Retry-After` in its delta-seconds form; HTTP dates are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
