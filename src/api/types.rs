//! API request and response types

use serde::{Deserialize, Serialize};

/// Request to relay a chat message
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(
        rename = "inputMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_message: Option<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
