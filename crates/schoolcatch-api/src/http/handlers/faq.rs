//! Static FAQ panels and localized UI strings.
//!
//! - GET /api/v1/faq?locale=
//! - GET /api/v1/faq/{topic}?locale=
//! - GET /api/v1/ui?locale=

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query};

use schoolcatch_core::faq::{FaqEntry, UiText, faq_entries, faq_entry, ui_text};

use crate::http::error::AppError;
use crate::http::extractors::query::LocaleQuery;
use crate::http::response::ApiResponse;

pub async fn list_faq(Query(query): Query<LocaleQuery>) -> Json<ApiResponse<&'static [FaqEntry]>> {
    let start = Instant::now();
    Json(ApiResponse::success(faq_entries(query.locale), start))
}

pub async fn get_faq(
    Path(topic): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<ApiResponse<&'static FaqEntry>>, AppError> {
    let start = Instant::now();
    let entry = faq_entry(query.locale, &topic)?;
    Ok(Json(
        ApiResponse::success(entry, start).with_link("all", &format!("/api/v1/faq?locale={}", query.locale)),
    ))
}

pub async fn get_ui_text(Query(query): Query<LocaleQuery>) -> Json<ApiResponse<&'static UiText>> {
    let start = Instant::now();
    Json(ApiResponse::success(ui_text(query.locale), start))
}
