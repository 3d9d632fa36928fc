//! Conversation controller: single event loop over the pure state machine

use super::traits::{ConversationView, RelayClient};
use crate::state_machine::{transition, ControllerState, ConversationState, Effect, Event};
use crate::store::{ConversationStore, Sender};
use crate::system_prompt::WELCOME_MESSAGE;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

const EVENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Error)]
#[error("Conversation controller has shut down")]
pub struct ControllerClosed;

/// Owns the transcript and busy flag. All mutation happens on its own loop;
/// the relay call is the only thing that runs elsewhere.
pub struct ConversationController<R, V>
where
    R: RelayClient + 'static,
    V: ConversationView + 'static,
{
    state: ControllerState,
    store: ConversationStore,
    last_error: Option<String>,
    relay: Arc<R>,
    view: Arc<V>,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so the loop ends once every handle is dropped
    event_tx: mpsc::WeakSender<Event>,
    snapshot_tx: watch::Sender<ConversationState>,
}

impl<R, V> ConversationController<R, V>
where
    R: RelayClient + 'static,
    V: ConversationView + 'static,
{
    /// Start a session: seed the welcome message and spawn the event loop.
    pub fn spawn(relay: R, view: V) -> ConversationHandle {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let mut store = ConversationStore::new();
        store.append(WELCOME_MESSAGE, Sender::Bot);
        let (snapshot_tx, snapshot_rx) = watch::channel(ConversationState {
            messages: store.all().to_vec(),
            busy: false,
            last_error: None,
        });

        let controller = Self {
            state: ControllerState::Idle,
            store,
            last_error: None,
            relay: Arc::new(relay),
            view: Arc::new(view),
            event_rx,
            event_tx: event_tx.downgrade(),
            snapshot_tx,
        };

        tracing::info!(
            conversation_id = %controller.store.conversation_id(),
            "Conversation started"
        );
        tokio::spawn(controller.run());

        ConversationHandle {
            event_tx,
            snapshot_rx,
        }
    }

    async fn run(mut self) {
        while let Some(event) = self.event_rx.recv().await {
            self.handle_event(event);
        }
        tracing::debug!(
            conversation_id = %self.store.conversation_id(),
            "Conversation ended"
        );
    }

    fn handle_event(&mut self, event: Event) {
        let result = match transition(&self.state, event) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(
                    conversation_id = %self.store.conversation_id(),
                    state = ?self.state,
                    reason = %e,
                    "Event ignored"
                );
                return;
            }
        };

        self.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect);
        }
        self.publish();
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { text, sender } => {
                self.store.append(text, sender);
            }
            Effect::ClearInput => {
                // A new submission supersedes the previous error
                self.last_error = None;
                self.view.clear_input();
            }
            Effect::RequestRelay { text } => {
                let relay = self.relay.clone();
                let event_tx = self.event_tx.clone();
                tokio::spawn(async move {
                    let outcome = relay.relay(&text).await;
                    // Session torn down while the call was in flight
                    let Some(event_tx) = event_tx.upgrade() else {
                        return;
                    };
                    let _ = event_tx.send(Event::RelayResolved { outcome }).await;
                });
            }
            Effect::NotifyError { message } => {
                self.view.show_error(&message);
                self.last_error = Some(message);
            }
            Effect::RestoreFocus => self.view.restore_focus(),
            Effect::ScrollToLatest => self.view.scroll_to_latest(),
        }
    }

    fn publish(&self) {
        let snapshot = ConversationState {
            messages: self.store.all().to_vec(),
            busy: self.state.is_busy(),
            last_error: self.last_error.clone(),
        };
        self.snapshot_tx.send_replace(snapshot);
    }
}

/// Cheap, cloneable handle the UI holds
#[derive(Clone)]
pub struct ConversationHandle {
    event_tx: mpsc::Sender<Event>,
    snapshot_rx: watch::Receiver<ConversationState>,
}

impl ConversationHandle {
    /// Submit user input. Blank input or a submit while busy is dropped by the
    /// controller; this only fails once the controller is gone.
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), ControllerClosed> {
        self.event_tx
            .send(Event::Submit { text: text.into() })
            .await
            .map_err(|_| ControllerClosed)
    }

    /// Latest published state
    pub fn snapshot(&self) -> ConversationState {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that wakes on every published state
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.snapshot_rx.clone()
    }

    /// Wait until the predicate holds for a published state
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ConversationState) -> bool,
    ) -> Result<ConversationState, ControllerClosed> {
        let mut rx = self.snapshot_rx.clone();
        let state = rx.wait_for(predicate).await.map_err(|_| ControllerClosed)?;
        Ok(state.clone())
    }
}
