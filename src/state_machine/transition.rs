//! Pure state transition function
//!
//! Given the same state and event it always yields the same result, with no
//! I/O. The runtime owns every side effect.

use super::{ControllerState, Effect, Event};
use crate::system_prompt::FALLBACK_MESSAGE;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ControllerState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ControllerState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Rejected events. The runtime drops these without touching state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A message is already being relayed")]
    Busy,
    #[error("Nothing to send")]
    EmptyInput,
    #[error("Relay result arrived with no submission outstanding")]
    UnexpectedResolution,
}

/// Effects fired once when a submission settles back to idle
fn settle_effects() -> [Effect; 2] {
    [Effect::RestoreFocus, Effect::ScrollToLatest]
}

pub fn transition(
    state: &ControllerState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        (ControllerState::Submitting, Event::Submit { .. }) => Err(TransitionError::Busy),

        (ControllerState::Idle, Event::Submit { text }) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyInput);
            }
            // User message lands before the relay starts
            Ok(TransitionResult::new(ControllerState::Submitting)
                .with_effect(Effect::append_user(text))
                .with_effect(Effect::ClearInput)
                .with_effect(Effect::RequestRelay {
                    text: text.to_string(),
                }))
        }

        (ControllerState::Submitting, Event::RelayResolved { outcome: Ok(reply) }) => {
            Ok(TransitionResult::new(ControllerState::Idle)
                .with_effect(Effect::append_bot(reply))
                .with_effects(settle_effects()))
        }

        (ControllerState::Submitting, Event::RelayResolved { outcome: Err(failure) }) => {
            Ok(TransitionResult::new(ControllerState::Idle)
                .with_effect(Effect::append_bot(FALLBACK_MESSAGE))
                .with_effect(Effect::NotifyError {
                    message: failure.message,
                })
                .with_effects(settle_effects()))
        }

        (ControllerState::Idle, Event::RelayResolved { .. }) => {
            Err(TransitionError::UnexpectedResolution)
        }
    }
}
