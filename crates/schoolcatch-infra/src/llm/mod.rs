//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `schoolcatch-core`, and a factory ([`create_provider`])
//! that builds it from the `[llm]` config section.

pub mod openai_compat;

use secrecy::SecretString;

use schoolcatch_core::llm::box_provider::BoxLlmProvider;
use schoolcatch_core::llm::provider::LlmProvider;
use schoolcatch_types::config::LlmConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] for the configured chat-completions endpoint.
pub fn create_provider(config: &LlmConfig, api_key: SecretString) -> BoxLlmProvider {
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_llm_config(config, api_key));
    tracing::debug!(
        provider = provider.name(),
        model = %config.model,
        base_url = %config.base_url,
        "Created LLM provider"
    );
    BoxLlmProvider::new(provider)
}
