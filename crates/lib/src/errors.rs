use crate::retrieval::RetrievalError;
use thiserror::Error;

/// Custom error types for the application.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Failed to parse schema document: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Failed to read schema document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid prompt template: {0}")]
    Template(String),
    #[error("Context retrieval failed: {0}")]
    Retrieval(Box<RetrievalError>),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl From<RetrievalError> for PromptError {
    fn from(err: RetrievalError) -> Self {
        PromptError::Retrieval(Box::new(err))
    }
}
