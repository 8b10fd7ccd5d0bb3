//! # AI Provider Factory
//!
//! Builds chat and embedding providers from configuration, so every consumer
//! (the CLI, tests) creates them the same way.

use crate::{
    constants::DEFAULT_CHAT_API_URL,
    errors::PromptError,
    providers::ai::{
        gemini::GeminiProvider, openai::OpenAiProvider, AiProvider, ApiEmbedder, Embedder,
    },
    types::{EmbeddingConfig, ProviderConfig, ProviderKind},
};
use tracing::info;

/// Creates the chat provider described by `config`.
///
/// Gemini always needs an API key. The OpenAI provider needs one when it
/// targets the hosted default URL; a custom `api_url` may point to a local
/// OpenAI-compatible server that accepts anonymous requests.
pub fn create_ai_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, PromptError> {
    let api_key = config.api_key.clone().filter(|k| !k.is_empty());

    let provider: Box<dyn AiProvider> = match config.provider {
        ProviderKind::Gemini => {
            let api_key = api_key.ok_or(PromptError::MissingApiKey)?;
            let api_url = config.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.model_name
                )
            });
            info!("Configuring Gemini provider with URL: {}", api_url);
            Box::new(GeminiProvider::new(api_url, api_key)?.with_temperature(config.temperature))
        }
        ProviderKind::OpenAi => {
            if config.api_url.is_none() && api_key.is_none() {
                return Err(PromptError::MissingApiKey);
            }
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CHAT_API_URL.to_string());
            info!(
                "Configuring OpenAI-compatible provider with URL: {} (model: {})",
                api_url, config.model_name
            );
            Box::new(
                OpenAiProvider::new(api_url, api_key, Some(config.model_name.clone()))?
                    .with_temperature(config.temperature),
            )
        }
    };

    Ok(provider)
}

/// Creates the embedding service described by `config`.
pub fn create_embedder(config: &EmbeddingConfig) -> Box<dyn Embedder> {
    info!(
        "Configuring embeddings with URL: {} (model: {})",
        config.api_url, config.model_name
    );
    Box::new(ApiEmbedder::new(
        config.api_url.clone(),
        config.model_name.clone(),
        config.api_key.clone().filter(|k| !k.is_empty()),
    ))
}
