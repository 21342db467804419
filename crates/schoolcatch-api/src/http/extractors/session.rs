//! Browser chat session extractor.
//!
//! The session identifier lives in the `schoolcatch_session` cookie. A
//! request without a usable cookie gets a fresh UUID v7 identifier, and the
//! response issues the cookie (return the extractor as a response part).

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, ResponseParts};

use schoolcatch_types::chat::SessionId;

pub const SESSION_COOKIE: &str = "schoolcatch_session";

/// The caller's chat session.
#[derive(Debug, Clone)]
pub struct BrowserSession {
    pub id: SessionId,
    /// True when the identifier was issued by this request.
    pub is_new: bool,
}

impl<S: Send + Sync> FromRequestParts<S> for BrowserSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match session_from_cookies(parts) {
            Some(id) => BrowserSession {
                id: SessionId::new(id),
                is_new: false,
            },
            None => {
                let id = SessionId::generate();
                tracing::debug!(session_id = %id, "Issuing chat session cookie");
                BrowserSession { id, is_new: true }
            }
        })
    }
}

impl IntoResponseParts for BrowserSession {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.is_new {
            let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                res.headers_mut().append(SET_COOKIE, value);
            }
        }
        Ok(res)
    }
}

fn session_from_cookies(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| is_valid_session_value(value))
}

/// Identifiers we issue are UUIDs; anything else is treated as absent.
fn is_valid_session_value(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 64
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
