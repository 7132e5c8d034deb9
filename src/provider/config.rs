//! Provider configuration

use crate::config::LlmConfig;
use serde::{Deserialize, Serialize};

/// Configuration for an OpenAI-compatible provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name for the provider
    pub name: String,
    /// API base URL (e.g., "https://api.openai.com/v1")
    pub base_url: String,
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Default model to use
    pub default_model: String,
}

impl ProviderConfig {
    /// Create an OpenAI provider config
    pub fn openai() -> Self {
        Self {
            name: "OpenAI".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            default_model: "gpt-4o-mini".to_string(),
        }
    }

    /// Create a custom provider config (e.g., LM Studio, vLLM)
    pub fn custom(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key_env: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key_env: api_key_env.into(),
            default_model: default_model.into(),
        }
    }

    /// Build from the `llm` section of the main config
    pub fn from_llm_config(llm: &LlmConfig) -> Self {
        match llm.base_url {
            Some(ref base_url) => Self::custom("custom", base_url, &llm.api_key_env, &llm.model),
            None => Self {
                api_key_env: llm.api_key_env.clone(),
                default_model: llm.model.clone(),
                ..Self::openai()
            },
        }
    }
}
