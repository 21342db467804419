//! Configuration types for SchoolCatch.
//!
//! `AppConfig` represents `schoolcatch.toml`. Every section and field has a
//! default, so an empty file (or no file at all) yields a runnable
//! configuration. API keys are never read from this file; they come from the
//! environment.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::term::AcademicTerm;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Anchor term used to resolve "this/next/previous semester".
    #[serde(default)]
    pub academic: AcademicTerm,

    #[serde(default)]
    pub rewriter: RewriterConfig,
}

impl AppConfig {
    /// Check values that would otherwise fail late (at first request).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_sql_identifier(&self.database.notices_table) {
            return Err(ConfigError::Invalid {
                field: "database.notices_table".to_string(),
                reason: format!(
                    "'{}' is not a plain table name (letters, digits, underscore)",
                    self.database.notices_table
                ),
            });
        }
        if !ACADEMIC_YEARS.contains(&self.academic.year) {
            return Err(ConfigError::Invalid {
                field: "academic.year".to_string(),
                reason: format!(
                    "{} is outside {}..={}",
                    self.academic.year,
                    ACADEMIC_YEARS.start(),
                    ACADEMIC_YEARS.end()
                ),
            });
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::Invalid {
                field: "llm.max_tokens".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.rewriter.rules.iter().any(|r| r.replacement.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "rewriter.rules".to_string(),
                reason: "replacement must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Accepted range for `academic.year`.
const ACADEMIC_YEARS: std::ops::RangeInclusive<u16> = 2000..=2999;

/// The table name is interpolated into SQL, so only bare identifiers are allowed.
fn is_sql_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional directory served instead of the built-in chat page.
    #[serde(default)]
    pub web_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: None,
        }
    }
}

/// Chat-completion provider settings (OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: default_chat_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

fn default_embedding_model() -> String {
    "text-embedding-3-large".to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: default_embedding_model(),
        }
    }
}

/// Pinecone index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Data-plane host of the index, e.g. `https://crawled-db-ver2-abc123.svc.pinecone.io`.
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Metadata key holding the document text.
    #[serde(default = "default_text_key")]
    pub text_key: String,
}

fn default_text_key() -> String {
    "text".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            namespace: None,
            text_key: default_text_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL; `SCHOOLCATCH_DATABASE_URL` takes precedence.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_notices_table")]
    pub notices_table: String,
}

fn default_notices_table() -> String {
    "swpre".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            notices_table: default_notices_table(),
        }
    }
}

/// How user questions are normalized before retrieval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriterMode {
    /// Deterministic synonym table.
    #[default]
    Synonym,
    /// Ask the LLM to apply the dictionary, falling back to the synonym table.
    Llm,
}

/// One synonym rule: any of `patterns` is replaced by `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub replacement: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriterConfig {
    #[serde(default)]
    pub mode: RewriterMode,
    #[serde(default = "default_rewrite_rules")]
    pub rules: Vec<RewriteRule>,
}

/// Expressions that refer to a person are normalized to "학생".
pub fn default_rewrite_rules() -> Vec<RewriteRule> {
    vec![RewriteRule {
        replacement: "학생".to_string(),
        patterns: ["사람", "학우", "재학생", "대학생", "학부생"]
            .into_iter()
            .map(String::from)
            .collect(),
    }]
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            mode: RewriterMode::default(),
            rules: default_rewrite_rules(),
        }
    }
}
