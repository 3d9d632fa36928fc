//! Completion provider abstraction
//!
//! One outbound call per user message: the fixed persona instruction plus the
//! user's text, answered with the provider's raw JSON payload.

mod error;
mod openai;
mod retry;
mod types;

#[cfg(test)]
mod proptests;

pub use error::{LlmError, LlmErrorKind};
pub use openai::CompletionClient;
pub use retry::RetryingService;
pub use types::*;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send the persona + user text and return the unparsed success payload
    async fn complete(&self, user_text: &str) -> Result<Value, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for completion services
pub struct LoggingService {
    inner: Arc<dyn CompletionService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn CompletionService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl CompletionService for LoggingService {
    async fn complete(&self, user_text: &str) -> Result<Value, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(user_text).await;
        let duration = start.elapsed();

        match &result {
            Ok(payload) => {
                let usage = Usage::from_payload(payload).unwrap_or_default();
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    input_tokens = usage.prompt_tokens,
                    output_tokens = usage.completion_tokens,
                    "Completion request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Completion request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
