//! Keyword lookup over the crawler's notices table.
//!
//! Follows the raw-query style of the rest of the crate: `sqlx::query` with
//! positional binds and a private Row struct for mapping.

use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Row};

use schoolcatch_core::notice::repository::NoticeRepository;
use schoolcatch_types::error::RepositoryError;
use schoolcatch_types::notice::Notice;

/// Notice repository over a MySQL (or SQLite) table with
/// `title`, `link`, `date` and `content` columns.
#[derive(Clone)]
pub struct SqlNoticeRepository {
    pool: AnyPool,
    table: String,
}

impl std::fmt::Debug for SqlNoticeRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlNoticeRepository")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl SqlNoticeRepository {
    /// Create a repository. No connection is opened until the first query.
    ///
    /// `table` must already be validated as a bare identifier; it is
    /// interpolated into the statement.
    pub fn new(database_url: &str, table: impl Into<String>) -> Result<Self, RepositoryError> {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect_lazy(database_url)
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self {
            pool,
            table: table.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Private Row type
// ---------------------------------------------------------------------------

struct NoticeRow {
    title: Option<String>,
    link: Option<String>,
    date: Option<String>,
}

impl NoticeRow {
    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            title: row.try_get("title")?,
            link: row.try_get("link")?,
            date: row.try_get("date")?,
        })
    }

    fn into_notice(self) -> Notice {
        Notice {
            title: self.title.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
        }
    }
}

impl NoticeRepository for SqlNoticeRepository {
    async fn find_by_keyword(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<Notice>, RepositoryError> {
        let sql = format!(
            "SELECT title, link, CAST(date AS CHAR) AS date FROM {} \
             WHERE content LIKE ? ORDER BY date DESC LIMIT ?",
            self.table
        );

        let rows = sqlx::query(&sql)
            .bind(format!("%{keyword}%"))
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                    RepositoryError::Connection(e.to_string())
                }
                other => RepositoryError::Query(other.to_string()),
            })?;

        let mut notices = Vec::with_capacity(rows.len());
        for row in &rows {
            let row = NoticeRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            notices.push(row.into_notice());
        }

        tracing::debug!(keyword, count = notices.len(), table = %self.table, "Notice lookup");
        Ok(notices)
    }
}
