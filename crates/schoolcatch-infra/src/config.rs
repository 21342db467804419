//! Configuration loader for SchoolCatch.
//!
//! Reads `schoolcatch.toml` and deserializes it into [`AppConfig`]. Falls
//! back to defaults when the file is missing or malformed. API keys and the
//! database URL come from the environment (a `.env` file is loaded by the
//! binary before this runs).

use std::path::Path;

use secrecy::SecretString;

use schoolcatch_types::config::AppConfig;
use schoolcatch_types::error::ConfigError;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "schoolcatch.toml";

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const PINECONE_API_KEY: &str = "PINECONE_API_KEY";
pub const DATABASE_URL: &str = "SCHOOLCATCH_DATABASE_URL";

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Environment overrides are applied on top in both cases.
pub async fn load_config(path: &Path) -> AppConfig {
    let mut config = read_config_file(path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

async fn read_config_file(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(DATABASE_URL).filter(|v| !v.trim().is_empty()) {
        config.database.url = Some(url);
    }
}

/// API keys for the hosted services.
///
/// Does NOT derive Debug.
pub struct ApiKeys {
    pub openai: SecretString,
    pub pinecone: SecretString,
}

impl ApiKeys {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            openai: require_secret(&lookup, OPENAI_API_KEY)?,
            pinecone: require_secret(&lookup, PINECONE_API_KEY)?,
        })
    }
}

fn require_secret(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<SecretString, ConfigError> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}
