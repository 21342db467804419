//! HTTP API layer for SchoolCatch.
//!
//! Axum-based API at `/api/v1/` with cookie-scoped chat sessions, envelope
//! responses, SSE answer streaming, and the built-in chat page.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
