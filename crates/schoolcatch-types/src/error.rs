use thiserror::Error;

use crate::faq::Locale;
use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in schoolcatch-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("not configured: {0}")]
    NotConfigured(String),
}

/// Errors from the retrieval step (embedding, similarity search, reformulation).
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding service error: {0}")]
    Embedding(String),

    #[error("vector index error: {0}")]
    Index(String),

    #[error("question reformulation failed: {0}")]
    Reformulation(#[from] LlmError),
}

/// Errors from one conversational RAG interaction.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("answer generation failed: {0}")]
    Generation(LlmError),

    #[error("question is empty")]
    EmptyQuestion,
}

/// Errors from the static FAQ content.
#[derive(Debug, Error)]
pub enum FaqError {
    #[error("no FAQ entry '{key}' for locale {locale}")]
    UnknownTopic { locale: Locale, key: String },
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required setting: {0}")]
    Missing(String),
}

/// A synonym rule that cannot be applied consistently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteRuleError {
    #[error("rewrite rule has an empty pattern")]
    EmptyPattern,

    #[error("replacement '{replacement}' contains its own pattern '{pattern}'")]
    SelfReferential { replacement: String, pattern: String },
}
