//! Trait abstractions for controller I/O
//!
//! The relay transport and the UI collaborator sit behind these traits so the
//! controller can be driven by mocks in tests.

use crate::relay::RelayFailure;
use async_trait::async_trait;
use std::sync::Arc;

/// Transport from the controller to a relay endpoint
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Relay one user message and return the assistant's reply text
    async fn relay(&self, text: &str) -> Result<String, RelayFailure>;
}

/// Presentation callbacks. Implemented by whatever renders the transcript.
pub trait ConversationView: Send + Sync {
    /// Input field cleared on submit, before the relay resolves
    fn clear_input(&self);

    /// Focus returns to the input once a submission settles
    fn restore_focus(&self);

    /// Transcript scrolls to the newest message once a submission settles
    fn scroll_to_latest(&self);

    /// Transient notification for a failed relay; not part of the transcript
    fn show_error(&self, message: &str);
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: RelayClient + ?Sized> RelayClient for Arc<T> {
    async fn relay(&self, text: &str) -> Result<String, RelayFailure> {
        (**self).relay(text).await
    }
}

impl<T: ConversationView + ?Sized> ConversationView for Arc<T> {
    fn clear_input(&self) {
        (**self).clear_input();
    }

    fn restore_focus(&self) {
        (**self).restore_focus();
    }

    fn scroll_to_latest(&self) {
        (**self).scroll_to_latest();
    }

    fn show_error(&self, message: &str) {
        (**self).show_error(message);
    }
}
