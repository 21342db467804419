//! Configuration for the OpenAI-compatible chat provider.

use secrecy::SecretString;

use schoolcatch_types::config::LlmConfig;
use schoolcatch_types::llm::ProviderCapabilities;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Default model when a request leaves `model` empty.
    pub model: String,
    pub capabilities: ProviderCapabilities,
}

impl OpenAiCompatConfig {
    /// Build from the `[llm]` config section.
    ///
    /// The provider is named "openai" for the public endpoint and
    /// "openai-compatible" for any other base URL.
    pub fn from_llm_config(config: &LlmConfig, api_key: SecretString) -> Self {
        let provider_name = if config.base_url.contains("api.openai.com") {
            "openai"
        } else {
            "openai-compatible"
        };
        Self {
            provider_name: provider_name.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            capabilities: gpt_4o_mini_capabilities(config.max_tokens),
        }
    }
}

/// Streaming; 128K context. Output is capped by the configured `max_tokens`.
fn gpt_4o_mini_capabilities(max_tokens: u32) -> ProviderCapabilities {
    ProviderCapabilities {
        streaming: true,
        max_context_tokens: 128_000,
        max_output_tokens: max_tokens.min(16_384),
    }
}
