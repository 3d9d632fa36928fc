//! Controller state types

use crate::store::Message;
use serde::Serialize;

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Waiting for user input
    #[default]
    Idle,
    /// Exactly one relay call outstanding
    Submitting,
}

impl ControllerState {
    pub fn is_busy(self) -> bool {
        matches!(self, ControllerState::Submitting)
    }
}

/// Snapshot handed to renderers
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub busy: bool,
    pub last_error: Option<String>,
}
