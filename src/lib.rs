//! Sous-chef: a cooking-assistant chat relay
//!
//! The server side relays user questions, wrapped in a fixed culinary persona,
//! to an `OpenAI`-compatible completion API. The client side keeps the
//! conversation transcript and drives it through a small state machine.

pub mod api;
pub mod config;
pub mod llm;
pub mod relay;
pub mod runtime;
pub mod state_machine;
pub mod store;
pub mod system_prompt;

#[cfg(test)]
pub mod testing;
