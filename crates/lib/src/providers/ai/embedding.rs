//! # Embeddings Provider
//!
//! Turns text into vectors through a remote embeddings API. OpenAI-compatible
//! endpoints take the whole batch in one request; Gemini's `embedContent`
//! takes a single text per request.

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

/// A trait for services that turn text into vectors.
#[async_trait]
pub trait Embedder: Send + Sync + Debug + DynClone {
    /// Embeds each input, returning one vector per input in the same order.
    async fn embed(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, PromptError>;
}

dyn_clone::clone_trait_object!(Embedder);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    OpenAi,
    Gemini,
}

impl Backend {
    fn for_url(api_url: &str) -> Self {
        if api_url.contains("generativelanguage.googleapis.com") {
            Backend::Gemini
        } else {
            Backend::OpenAi
        }
    }
}

/// An [`Embedder`] backed by a remote embeddings API.
///
/// The backend is chosen from the URL: Google's generative language host
/// means Gemini, anything else is treated as OpenAI-compatible.
#[derive(Clone, Debug)]
pub struct ApiEmbedder {
    client: ReqwestClient,
    backend: Backend,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl ApiEmbedder {
    pub fn new(api_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: ReqwestClient::new(),
            backend: Backend::for_url(&api_url),
            api_url,
            model,
            api_key,
        }
    }

    async fn embed_openai(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, PromptError> {
        debug!(count = inputs.len(), url = %self.api_url, "--> Requesting embeddings");
        let mut request = self.client.post(&self.api_url).json(&OpenAiRequest {
            model: &self.model,
            input: inputs,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let OpenAiResponse { mut data } = send_json(request).await?;
        if data.len() != inputs.len() {
            return Err(PromptError::AiApi(format!(
                "Embeddings API returned {} embeddings for {} inputs",
                data.len(),
                inputs.len()
            )));
        }
        // Entries without an index keep their relative order at the end.
        data.sort_by_key(|d| d.index.unwrap_or(usize::MAX));
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    async fn embed_gemini(&self, input: &str) -> Result<Vec<f32>, PromptError> {
        let model = match self.model.strip_prefix("models/") {
            Some(_) => self.model.clone(),
            None => format!("models/{}", self.model),
        };
        debug!(url = %self.api_url, %model, "--> Requesting Gemini embedding");
        let mut request = self.client.post(&self.api_url).json(&GeminiRequest {
            model,
            content: GeminiContent {
                parts: [GeminiPart { text: input }],
            },
        });
        if let Some(key) = &self.api_key {
            request = request.header("x-goog-api-key", key);
        }

        let response: GeminiResponse = send_json(request).await?;
        Ok(response.embedding.values)
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    async fn embed(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, PromptError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        match self.backend {
            Backend::OpenAi => self.embed_openai(inputs).await,
            Backend::Gemini => {
                let mut vectors = Vec::with_capacity(inputs.len());
                for input in inputs {
                    vectors.push(self.embed_gemini(input).await?);
                }
                Ok(vectors)
            }
        }
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, PromptError> {
    let response = request.send().await.map_err(PromptError::AiRequest)?;
    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(PromptError::AiApi(error_text));
    }
    response.json().await.map_err(PromptError::AiDeserialization)
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    model: String,
    content: GeminiContent<'a>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: [GeminiPart<'a>; 1],
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    embedding: GeminiValues,
}

#[derive(Deserialize)]
struct GeminiValues {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_is_detected_from_the_url() {
        assert_eq!(
            Backend::for_url("https://generativelanguage.googleapis.com/v1beta/models/x:embedContent"),
            Backend::Gemini
        );
        assert_eq!(
            Backend::for_url("http://localhost:8080/v1/embeddings"),
            Backend::OpenAi
        );
    }
}
