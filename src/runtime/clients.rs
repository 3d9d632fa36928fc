//! Relay clients for front-ends: in-process and over HTTP

use super::traits::RelayClient;
use crate::api::{ChatRequest, ErrorResponse};
use crate::llm::{extract_content, DEFAULT_UPSTREAM_ERROR};
use crate::relay::{RelayEndpoint, RelayFailure, INTERNAL_ERROR};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Calls a `RelayEndpoint` living in the same process
pub struct EndpointRelayClient {
    endpoint: Arc<RelayEndpoint>,
}

impl EndpointRelayClient {
    pub fn new(endpoint: Arc<RelayEndpoint>) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl RelayClient for EndpointRelayClient {
    async fn relay(&self, text: &str) -> Result<String, RelayFailure> {
        let payload = self.endpoint.handle(Some(text)).await?;
        Ok(extract_content(&payload)?)
    }
}

/// Posts `{inputMessage}` to a running relay server
pub struct HttpRelayClient {
    client: Client,
    url: String,
}

impl HttpRelayClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RelayFailure> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayFailure::internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn relay(&self, text: &str) -> Result<String, RelayFailure> {
        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest {
                input_message: Some(text.to_string()),
            })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.url, error = %e, "Relay unreachable");
                RelayFailure::transport(INTERNAL_ERROR)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to read relay response");
                RelayFailure::transport(INTERNAL_ERROR)
            })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map_or_else(|_| DEFAULT_UPSTREAM_ERROR.to_string(), |r| r.error);
            // The server answers 500 for transport, malformed and internal
            // failures alike; the kind cannot be recovered from the status.
            return Err(match status.as_u16() {
                400 => RelayFailure::validation(message),
                500 => RelayFailure::transport(message),
                other => RelayFailure::upstream(other, message),
            });
        }

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse relay response");
            RelayFailure::malformed(INTERNAL_ERROR)
        })?;
        Ok(extract_content(&payload)?)
    }
}
