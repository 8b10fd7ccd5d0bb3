//! Chat and embedding providers.

pub mod embedding;
pub mod gemini;
pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
pub use embedding::{ApiEmbedder, Embedder};
use std::fmt::Debug;

/// A chat model that answers a system prompt plus a user prompt with text.
///
/// Implementations make exactly one request per call and return the model's
/// answer untouched; trimming is left to the caller.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
