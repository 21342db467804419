//! Chat endpoints.
//!
//! - `POST /api/v1/chat/stream`: answer streamed as Server-Sent Events.
//! - `POST /api/v1/chat`: the full answer in one JSON envelope.
//!
//! SSE event types:
//! - `session`: first event, `{ "session_id": "..." }`
//! - `text_delta`: answer fragment, `{ "text": "..." }`
//! - `error`: the interaction failed, `{ "message": "..." }`
//! - `done`: stream complete, `{}`
//!
//! The exchange is recorded in the session only when the answer completes.
//! A client that disconnects mid-answer drops the stream and nothing is
//! recorded.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_stream::Stream;

use crate::http::error::AppError;
use crate::http::extractors::session::BrowserSession;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for both chat endpoints.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatAnswer {
    pub session_id: String,
    pub answer: String,
}

fn validated_message(body: ChatRequest) -> Result<String, AppError> {
    let message = body.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }
    Ok(message)
}

/// POST /api/v1/chat/stream
pub async fn stream_chat(
    State(state): State<AppState>,
    session: BrowserSession,
    Json(body): Json<ChatRequest>,
) -> Result<(BrowserSession, Sse<impl Stream<Item = Result<Event, Infallible>>>), AppError> {
    let message = validated_message(body)?;
    let session_id = session.id.clone();
    let mut answer = state.chain.clone().stream_answer(session_id.clone(), message);

    let sse_stream = async_stream::stream! {
        let session_json = serde_json::json!({ "session_id": session_id.to_string() });
        yield Ok::<_, Infallible>(Event::default().event("session").data(session_json.to_string()));

        let start = Instant::now();
        let mut fragments = 0usize;
        while let Some(fragment) = answer.next().await {
            match fragment {
                Ok(text) => {
                    fragments += 1;
                    let data = serde_json::json!({ "text": text });
                    yield Ok(Event::default().event("text_delta").data(data.to_string()));
                }
                Err(e) => {
                    tracing::warn!(session_id = %session_id, error = %e, "Chat stream failed");
                    let data = serde_json::json!({ "message": e.to_string() });
                    yield Ok(Event::default().event("error").data(data.to_string()));
                    break;
                }
            }
        }

        tracing::info!(
            session_id = %session_id,
            fragments,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Chat stream finished"
        );
        yield Ok(Event::default().event("done").data("{}"));
    };

    Ok((
        session,
        Sse::new(sse_stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))),
    ))
}

/// POST /api/v1/chat
pub async fn chat(
    State(state): State<AppState>,
    session: BrowserSession,
    Json(body): Json<ChatRequest>,
) -> Result<(BrowserSession, Json<ApiResponse<ChatAnswer>>), AppError> {
    let start = Instant::now();
    let message = validated_message(body)?;
    let answer = state.chain.clone().answer(session.id.clone(), message).await?;

    let resp = ApiResponse::success(
        ChatAnswer {
            session_id: session.id.to_string(),
            answer,
        },
        start,
    )
    .with_link("messages", "/api/v1/session/messages");
    Ok((session, Json(resp)))
}
