//! HTTP API for the relay

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::relay::RelayEndpoint;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayEndpoint>,
}

impl AppState {
    pub fn new(relay: Arc<RelayEndpoint>) -> Self {
        Self { relay }
    }
}
