//! Server-side relay: validate the user's message, forward it with the
//! persona, and normalize every outcome into a payload or a structured error.

use crate::llm::{extract_content, CompletionService, LlmError, LlmErrorKind};
use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;

/// Message returned for missing or blank input
pub const MISSING_INPUT: &str = "Input message is required";

/// Public message for server-side failures; details stay in the logs
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Failure categories surfaced by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayErrorKind {
    /// Missing or empty input; the caller's fault
    Validation,
    /// Provider rejected the request
    Upstream,
    /// Provider answered 2xx with an unusable payload
    MalformedResponse,
    /// Provider could not be reached
    Transport,
    /// Anything else caught at the boundary
    Internal,
}

/// Coarse HTTP status class, so callers can tell "the provider rejected us"
/// from "we couldn't reach the provider"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    ClientError,
    UpstreamError,
    ServerError,
}

/// Structured relay failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RelayFailure {
    pub kind: RelayErrorKind,
    /// HTTP status to answer with
    pub status: u16,
    pub message: String,
}

impl RelayFailure {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: RelayErrorKind::Validation,
            status: 400,
            message: message.into(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: RelayErrorKind::Upstream,
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: RelayErrorKind::MalformedResponse,
            status: 500,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: RelayErrorKind::Transport,
            status: 500,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: RelayErrorKind::Internal,
            status: 500,
            message: message.into(),
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match self.kind {
            RelayErrorKind::Validation => StatusClass::ClientError,
            RelayErrorKind::Upstream => StatusClass::UpstreamError,
            RelayErrorKind::MalformedResponse
            | RelayErrorKind::Transport
            | RelayErrorKind::Internal => StatusClass::ServerError,
        }
    }
}

impl From<LlmError> for RelayFailure {
    fn from(e: LlmError) -> Self {
        match e.kind {
            LlmErrorKind::Upstream { status } => Self::upstream(status, e.message),
            LlmErrorKind::MalformedResponse => {
                tracing::error!(error = %e.message, "Malformed completion response");
                Self::malformed(INTERNAL_ERROR)
            }
            LlmErrorKind::Transport => {
                tracing::error!(error = %e.message, "Completion provider unreachable");
                Self::transport(INTERNAL_ERROR)
            }
        }
    }
}

/// Relay endpoint. One attempt per call; no retry of its own.
pub struct RelayEndpoint {
    completion: Arc<dyn CompletionService>,
}

impl RelayEndpoint {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Relay one user message. Never panics past this boundary.
    pub async fn handle(&self, input_message: Option<&str>) -> Result<Value, RelayFailure> {
        let text = match input_message {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(RelayFailure::validation(MISSING_INPUT)),
        };

        let payload = AssertUnwindSafe(self.completion.complete(text))
            .catch_unwind()
            .await
            .map_err(|_| RelayFailure::internal(INTERNAL_ERROR))??;

        // The payload is forwarded raw, but only if a front-end can read it
        extract_content(&payload)?;
        Ok(payload)
    }

    pub fn model_id(&self) -> &str {
        self.completion.model_id()
    }
}
