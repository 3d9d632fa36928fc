//! Effects produced by state transitions

use crate::store::Sender;

/// Effects to be executed, in order, after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the transcript
    AppendMessage { text: String, sender: Sender },

    /// Clear the UI input field
    ClearInput,

    /// Start the relay call for this text
    RequestRelay { text: String },

    /// Record the error and show a transient notification
    NotifyError { message: String },

    /// Give the input field focus back
    RestoreFocus,

    /// Scroll the transcript to the newest message
    ScrollToLatest,
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn append_bot(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}
