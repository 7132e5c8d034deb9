//! OpenAI-compatible provider client
//!
//! Sends a single two-message chat completion in JSON mode and hands back
//! the raw content. Interpreting that content is the generator's job.

use super::ProviderConfig;
use crate::auth::AuthConfig;
use crate::config::LlmConfig;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;

/// Sampling temperature for every generation call; output must be deterministic
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Failed to build request: {0}")]
    Build(String),
    #[error("API request failed: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
}

impl From<OpenAIError> for ProviderError {
    fn from(e: OpenAIError) -> Self {
        match e {
            OpenAIError::Reqwest(e) => ProviderError::Network(e.to_string()),
            OpenAIError::InvalidArgument(msg) => ProviderError::Build(msg),
            other => ProviderError::Api(other.to_string()),
        }
    }
}

/// A completion service that answers in JSON mode.
///
/// Returns the content of the first choice, `None` when the model sent none.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete_json(&self, system: &str, user: &str)
        -> Result<Option<String>, ProviderError>;
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for std::sync::Arc<T> {
    async fn complete_json(
        &self,
        system: &str,
        user: &str,
    ) -> Result<Option<String>, ProviderError> {
        (**self).complete_json(system, user).await
    }
}

/// OpenAI-compatible client wrapper
#[derive(Clone)]
pub struct ProviderClient {
    config: ProviderConfig,
    client: Client<OpenAIConfig>,
}

impl ProviderClient {
    /// Create a client with an explicit API key (falls back to env and auth.json)
    pub fn with_api_key(config: ProviderConfig, api_key: Option<String>) -> Self {
        let api_key = api_key
            .or_else(|| Self::get_api_key(&config))
            .unwrap_or_else(|| {
                // The remote call will fail authentication and report it
                tracing::warn!(
                    api_key_env = %config.api_key_env,
                    "No API key found in environment or auth.json"
                );
                String::new()
            });

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.base_url);

        Self {
            config,
            client: Client::with_config(openai_config),
        }
    }

    /// Build a client from the `llm` section of the main config
    pub fn from_llm_config(llm: &LlmConfig) -> Self {
        let config = ProviderConfig::from_llm_config(llm);
        Self::with_api_key(config, llm.api_key.clone())
    }

    /// Get API key from environment or auth.json
    fn get_api_key(config: &ProviderConfig) -> Option<String> {
        // Try loading .env file
        let _ = dotenvy::dotenv();

        if let Ok(key) = std::env::var(&config.api_key_env) {
            return Some(key);
        }

        let auth = AuthConfig::load().ok()?;
        auth.api_key(&config.name.to_lowercase()).map(String::from)
    }
}

#[async_trait]
impl CompletionBackend for ProviderClient {
    async fn complete_json(
        &self,
        system: &str,
        user: &str,
    ) -> Result<Option<String>, ProviderError> {
        let model = &self.config.default_model;

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .temperature(TEMPERATURE)
            .response_format(ResponseFormat::JsonObject)
            .messages(messages)
            .build()?;

        let start = std::time::Instant::now();
        tracing::info!(
            target: "llm",
            provider = %self.config.name,
            model = %model,
            prompt_chars = user.chars().count(),
            "Starting JSON-mode LLM call"
        );

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                target: "llm",
                error = %e,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "JSON-mode LLM call failed"
            );
            ProviderError::from(e)
        })?;

        let input_tokens = response.usage.as_ref().map(|u| u.prompt_tokens);
        let output_tokens = response.usage.as_ref().map(|u| u.completion_tokens);

        tracing::info!(
            target: "llm",
            model = %model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            input_tokens = input_tokens,
            output_tokens = output_tokens,
            "JSON-mode LLM call completed"
        );

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
