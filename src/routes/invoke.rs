//! Trigger entry point.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use crate::sync::{self, Dispatch};
use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/invoke", post(invoke))
        .with_state(state)
}

/// POST /invoke - dispatch a trigger payload.
///
/// Full-sync triggers answer with the `{statusCode, body}` object (the
/// HTTP status mirrors it); anything else is treated as a single-user
/// event and echoed back unchanged.
async fn invoke(State(state): State<Arc<AppState>>, Json(event): Json<Value>) -> Response {
    match sync::handle_event(&state, event).await {
        Dispatch::FullSync(response) => {
            let status = StatusCode::from_u16(response.status_code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(response)).into_response()
        }
        Dispatch::Passthrough(payload) => Json(payload).into_response(),
    }
}
