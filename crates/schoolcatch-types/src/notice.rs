//! Notice types: vector-index documents, relational notice rows, and the
//! few-shot examples used to steer answer style.

use serde::{Deserialize, Serialize};

/// A notice document returned by similarity search.
///
/// Owned by the external vector index; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeDocument {
    /// Free-text body that was embedded.
    pub content: String,
    /// Original notice URL.
    pub source: Option<String>,
    pub title: Option<String>,
    /// Publication date as stored by the crawler (e.g. "2024-08-16").
    pub date: Option<String>,
    /// Similarity score reported by the index (higher is closer).
    pub score: f32,
}

/// A row of the relational notices table, as shown in "recommended notices".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub link: String,
    pub date: String,
}

/// Outcome of a recommended-notices lookup.
///
/// A failed lookup is reported through `error` with an empty `notices` list
/// instead of failing the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedNotices {
    pub notices: Vec<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A worked (question, answer) pair included in the answer prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FewShotExample {
    pub input: String,
    pub answer: String,
}
