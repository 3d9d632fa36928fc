//! Completion provider error types

use std::time::Duration;
use thiserror::Error;

/// Completion error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    pub retry_after: Option<Duration>,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Upstream { status }, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::MalformedResponse, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Transport, message)
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Provider answered with a non-success status
    Upstream { status: u16 },
    /// Provider answered 2xx but the payload is not what we expect
    MalformedResponse,
    /// Provider could not be reached (connect failure, timeout, broken body)
    Transport,
}

impl LlmErrorKind {
    /// Whether the bounded-retry decorator may try again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport => true,
            Self::Upstream { status } => *status == 429 || (500..=599).contains(status),
            Self::MalformedResponse => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "upstream",
            Self::MalformedResponse => "malformed_response",
            Self::Transport => "transport",
        }
    }
}
