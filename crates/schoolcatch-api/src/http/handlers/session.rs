//! Current-browser session endpoints.
//!
//! - GET  /api/v1/session/messages - turns recorded so far
//! - POST /api/v1/session/clear    - start over, keeping the identifier

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use schoolcatch_types::chat::Turn;

use crate::http::extractors::session::BrowserSession;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionMessages {
    pub session_id: String,
    pub messages: Vec<Turn>,
}

/// GET /api/v1/session/messages
pub async fn get_messages(
    State(state): State<AppState>,
    session: BrowserSession,
) -> (BrowserSession, Json<ApiResponse<SessionMessages>>) {
    let start = Instant::now();
    let history = state.chain.history(&session.id).await;

    let resp = ApiResponse::success(
        SessionMessages {
            session_id: session.id.to_string(),
            messages: history.turns().to_vec(),
        },
        start,
    )
    .with_link("self", "/api/v1/session/messages")
    .with_link("clear", "/api/v1/session/clear");
    (session, Json(resp))
}

/// POST /api/v1/session/clear
pub async fn clear_session(
    State(state): State<AppState>,
    session: BrowserSession,
) -> (BrowserSession, Json<ApiResponse<serde_json::Value>>) {
    let start = Instant::now();
    state.chain.clear(&session.id).await;

    let resp = ApiResponse::success(serde_json::json!({ "cleared": true }), start);
    (session, Json(resp))
}
