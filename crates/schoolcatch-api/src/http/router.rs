//! Axum router configuration with middleware.
//!
//! API routes are under `/api/v1/`. Middleware: CORS, tracing.
//!
//! `GET /` serves the built-in chat page. When `server.web_dir` is set, that
//! directory is served instead; API routes and `/health` take priority.

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat
        .route("/chat", post(handlers::chat::chat))
        .route("/chat/stream", post(handlers::chat::stream_chat))
        // Current browser session
        .route("/session/messages", get(handlers::session::get_messages))
        .route("/session/clear", post(handlers::session::clear_session))
        // Recommended notices
        .route("/notices/recommended", get(handlers::notice::recommended_notices))
        // Static content
        .route("/faq", get(handlers::faq::list_faq))
        .route("/faq/{topic}", get(handlers::faq::get_faq))
        .route("/ui", get(handlers::faq::get_ui_text));

    let web_dir = state.config.server.web_dir.clone();

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check));

    match web_dir.filter(|dir| std::path::Path::new(dir).exists()) {
        Some(dir) => {
            let index_path = format!("{dir}/index.html");
            router = router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index_path)));
            tracing::info!(path = %dir, "Static file serving enabled");
        }
        None => {
            router = router.route("/", get(index_page));
        }
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health - liveness plus the number of chat sessions held in memory.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.chain.session_count(),
    }))
}
