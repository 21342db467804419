//! Notice repository trait definition.

use schoolcatch_types::error::RepositoryError;
use schoolcatch_types::notice::Notice;

/// Read-only access to the notices table.
///
/// Implementations live in schoolcatch-infra (e.g., SqlNoticeRepository).
pub trait NoticeRepository: Send + Sync {
    /// Notices whose body contains `keyword`, newest first, at most `limit`.
    fn find_by_keyword(
        &self,
        keyword: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Notice>, RepositoryError>> + Send;
}
