//! Runtime for driving a conversation
//!
//! The controller loop executes state machine effects; relay clients carry
//! user messages to a relay endpoint, in-process or over HTTP.

mod clients;
mod executor;
pub mod traits;

pub use clients::{EndpointRelayClient, HttpRelayClient};
pub use executor::{ControllerClosed, ConversationController, ConversationHandle};
pub use traits::*;
