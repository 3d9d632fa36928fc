//! Mock implementations for testing
//!
//! These mocks let the relay and the controller run without a provider.

use crate::llm::{CompletionService, LlmError};
use crate::relay::RelayFailure;
use crate::runtime::{ConversationView, RelayClient};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

// ============================================================================
// Mock Completion Service
// ============================================================================

/// Completion service that returns queued payloads
pub struct MockCompletionService {
    responses: Mutex<VecDeque<Result<Value, LlmError>>>,
    /// Record of every user text sent
    requests: Mutex<Vec<String>>,
}

impl MockCompletionService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a provider-shaped payload whose reply is `content`
    pub fn queue_success(&self, content: &str) {
        self.queue_payload(json!({
            "id": "mock-completion",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
        }));
    }

    pub fn queue_payload(&self, payload: Value) {
        self.responses.lock().unwrap().push_back(Ok(payload));
    }

    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete(&self, user_text: &str) -> Result<Value, LlmError> {
        self.requests.lock().unwrap().push(user_text.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::transport("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

/// Completion service that panics mid-call
pub struct PanickingCompletionService;

#[async_trait]
impl CompletionService for PanickingCompletionService {
    async fn complete(&self, _user_text: &str) -> Result<Value, LlmError> {
        panic!("provider client blew up");
    }

    fn model_id(&self) -> &str {
        "panicking-model"
    }
}

// ============================================================================
// Mock Relay Clients
// ============================================================================

/// Relay client that returns queued outcomes immediately
pub struct MockRelayClient {
    outcomes: Mutex<VecDeque<Result<String, RelayFailure>>>,
    requests: Mutex<Vec<String>>,
}

impl MockRelayClient {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, reply: &str) {
        self.outcomes.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub fn queue_failure(&self, failure: RelayFailure) {
        self.outcomes.lock().unwrap().push_back(Err(failure));
    }

    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayClient for MockRelayClient {
    async fn relay(&self, text: &str) -> Result<String, RelayFailure> {
        self.requests.lock().unwrap().push(text.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayFailure::transport("No mock outcome queued")))
    }
}

/// Relay client that holds each call open until the test releases it
pub struct GatedRelayClient {
    outcome: Mutex<Option<Result<String, RelayFailure>>>,
    gate: Notify,
    requests: Mutex<Vec<String>>,
}

impl GatedRelayClient {
    pub fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            gate: Notify::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Let the outstanding (or next) call finish with `outcome`
    pub fn release(&self, outcome: Result<String, RelayFailure>) {
        *self.outcome.lock().unwrap() = Some(outcome);
        self.gate.notify_one();
    }

    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayClient for GatedRelayClient {
    async fn relay(&self, text: &str) -> Result<String, RelayFailure> {
        self.requests.lock().unwrap().push(text.to_string());
        loop {
            let ready = self.outcome.lock().unwrap().take();
            if let Some(outcome) = ready {
                return outcome;
            }
            self.gate.notified().await;
        }
    }
}

// ============================================================================
// Recording View
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    ClearInput,
    RestoreFocus,
    ScrollToLatest,
    ShowError(String),
}

/// View that records every callback in order
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &ViewCall) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }
}

impl ConversationView for RecordingView {
    fn clear_input(&self) {
        self.calls.lock().unwrap().push(ViewCall::ClearInput);
    }

    fn restore_focus(&self) {
        self.calls.lock().unwrap().push(ViewCall::RestoreFocus);
    }

    fn scroll_to_latest(&self) {
        self.calls.lock().unwrap().push(ViewCall::ScrollToLatest);
    }

    fn show_error(&self, message: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(ViewCall::ShowError(message.to_string()));
    }
}
