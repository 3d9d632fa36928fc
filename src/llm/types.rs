//! Wire types for the chat completions API

use super::LlmError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// Role-tagged entry in a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Completion request body
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub stream: bool,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Build the two-entry persona + user request. Streaming is off and
    /// sampling is deterministic.
    pub fn persona(system: &str, user_text: &str, model: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: MessageRole::System,
                    content: system.to_string(),
                },
                ChatMessage {
                    role: MessageRole::User,
                    content: user_text.to_string(),
                },
            ],
            model: model.to_string(),
            stream: false,
            temperature: 0.0,
        }
    }
}

/// Token usage as reported by the provider, when present
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[allow(clippy::struct_field_names)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

impl Usage {
    pub fn from_payload(payload: &Value) -> Option<Self> {
        payload
            .get("usage")
            .and_then(|u| serde_json::from_value(u.clone()).ok())
    }
}

/// Pull `choices[0].message.content` out of a raw completion payload.
///
/// A missing path or a non-string content is a malformed response, never an
/// empty message.
pub fn extract_content(payload: &Value) -> Result<String, LlmError> {
    let choice = payload
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| LlmError::malformed("No choices in response"))?;

    choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LlmError::malformed("Response choice has no message content"))
}

/// Default message when the provider's error body carries nothing usable
pub const DEFAULT_UPSTREAM_ERROR: &str = "Failed to fetch from AI API";

/// Read the provider's error message from a non-success body.
///
/// Accepts both `{"error": "..."}` and the OpenAI shape
/// `{"error": {"message": "..."}}`.
pub fn provider_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return DEFAULT_UPSTREAM_ERROR.to_string();
    };

    match value.get("error") {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map_or_else(|| DEFAULT_UPSTREAM_ERROR.to_string(), str::to_string),
        _ => DEFAULT_UPSTREAM_ERROR.to_string(),
    }
}
