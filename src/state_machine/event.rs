//! Events that drive the controller

use crate::relay::RelayFailure;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// User pressed send
    Submit { text: String },
    /// The outstanding relay call finished
    RelayResolved {
        outcome: Result<String, RelayFailure>,
    },
}
