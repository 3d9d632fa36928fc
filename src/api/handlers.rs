//! HTTP request handlers

use super::types::{ChatRequest, ErrorResponse};
use super::AppState;
use crate::relay::RelayFailure;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Relay a user message to the completion provider
        .route("/api/chat", post(relay_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat Relay
// ============================================================

async fn relay_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    // An unreadable body is treated like a missing message
    let input_message = match body {
        Ok(Json(req)) => req.input_message,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected chat request body");
            None
        }
    };

    let payload = state.relay.handle(input_message.as_deref()).await?;
    Ok(Json(payload))
}

async fn get_version() -> &'static str {
    concat!("sous-chef ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

struct AppError(RelayFailure);

impl From<RelayFailure> for AppError {
    fn from(failure: RelayFailure) -> Self {
        Self(failure)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(ErrorResponse::new(self.0.message));
        (status, body).into_response()
    }
}
