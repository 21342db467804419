//! GET /api/v1/notices/recommended?department=&locale=

use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};

use schoolcatch_core::faq::ui_text;
use schoolcatch_core::notice::service::LOGIN_REQUIRED;
use schoolcatch_types::notice::RecommendedNotices;

use crate::http::extractors::query::NoticeQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

pub async fn recommended_notices(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Json<ApiResponse<RecommendedNotices>> {
    let start = Instant::now();
    let mut result = state.recommend_notices(&query.department).await;

    // The service speaks Korean; swap in the page language for the login hint.
    if result.error.as_deref() == Some(LOGIN_REQUIRED) {
        result.error = Some(ui_text(query.locale).login_required.to_string());
    }

    Json(ApiResponse::success(result, start))
}
