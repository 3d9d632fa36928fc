//! Conversation controller state machine
//!
//! Pure transitions in the Elm Architecture style: the runtime feeds events in
//! and executes the effects that come out.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ControllerState, ConversationState};
pub use transition::{transition, TransitionError, TransitionResult};
