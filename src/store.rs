//! Append-only conversation transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message identity, unique and increasing within one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
}

/// Ordered transcript for a single session
#[derive(Debug)]
pub struct ConversationStore {
    conversation_id: Uuid,
    next_id: u64,
    messages: Vec<Message>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            conversation_id: Uuid::new_v4(),
            next_id: 1,
            messages: Vec::new(),
        }
    }

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    /// Append a message, assigning the next id
    pub fn append(&mut self, text: impl Into<String>, sender: Sender) -> Message {
        let message = Message {
            id: MessageId(self.next_id),
            text: text.into(),
            sender,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }

    /// Read-only view in creation order
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
