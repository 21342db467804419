//! Recommended-notices service.
//!
//! Matches the user's department against notice bodies. Lookup failures never
//! propagate: they become an error message next to an empty list so the page
//! keeps rendering.

use tracing::{info, warn};

use schoolcatch_types::notice::RecommendedNotices;

use super::repository::NoticeRepository;

/// Notices shown per lookup.
pub const RECOMMENDED_LIMIT: usize = 3;

/// Reported when no department is known for the user.
pub const LOGIN_REQUIRED: &str = "로그인 후 공지사항을 확인할 수 있습니다.";

pub struct NoticeService<R: NoticeRepository> {
    repo: R,
}

impl<R: NoticeRepository> NoticeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Up to [`RECOMMENDED_LIMIT`] notices mentioning `department`, newest first.
    ///
    /// A blank department means the user is not identified: no lookup runs
    /// and [`LOGIN_REQUIRED`] is reported.
    pub async fn recommend(&self, department: &str) -> RecommendedNotices {
        let department = department.trim();
        if department.is_empty() {
            return RecommendedNotices {
                notices: Vec::new(),
                error: Some(LOGIN_REQUIRED.to_string()),
            };
        }

        match self.repo.find_by_keyword(department, RECOMMENDED_LIMIT).await {
            Ok(mut notices) => {
                notices.truncate(RECOMMENDED_LIMIT);
                info!(department, count = notices.len(), "Loaded recommended notices");
                RecommendedNotices {
                    notices,
                    error: None,
                }
            }
            Err(e) => {
                warn!(department, error = %e, "Recommended notices lookup failed");
                RecommendedNotices {
                    notices: Vec::new(),
                    error: Some(format!("추천 공지사항을 불러오지 못했습니다: {e}")),
                }
            }
        }
    }
}
