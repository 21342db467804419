//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use schoolcatch_core::faq::ui_text;
use schoolcatch_types::error::{ChainError, FaqError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Chain(ChainError),
    Faq(FaqError),
    Validation(String),
    Internal(String),
}

impl From<ChainError> for AppError {
    fn from(e: ChainError) -> Self {
        AppError::Chain(e)
    }
}

impl From<FaqError> for AppError {
    fn from(e: FaqError) -> Self {
        AppError::Faq(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Chain(ChainError::EmptyQuestion) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.message())
            }
            AppError::Chain(ChainError::Retrieval(_)) => {
                (StatusCode::BAD_GATEWAY, "RETRIEVAL_ERROR", self.message())
            }
            AppError::Chain(ChainError::Generation(_)) => {
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", self.message())
            }
            AppError::Faq(FaqError::UnknownTopic { locale, key }) => (
                StatusCode::NOT_FOUND,
                "FAQ_NOT_FOUND",
                format!("{} ({key})", ui_text(*locale).not_found),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Chain(e) => e.to_string(),
            AppError::Faq(e) => e.to_string(),
            AppError::Validation(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::warn!(code, %message, "Request failed");
        }
        (status, Json(ApiResponse::error(code, &message))).into_response()
    }
}
