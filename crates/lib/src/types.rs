use crate::constants::{DEFAULT_EMBEDDINGS_API_URL, DEFAULT_EMBEDDINGS_MODEL};
use crate::context::{ContextProvider, SchemaTextContext};
use crate::errors::PromptError;
use crate::formatter::ColumnSelection;
use crate::prompts::tasks::{
    SQLALCHEMY_SYSTEM_PROMPT, SQLALCHEMY_USER_PROMPT, SQL_SYSTEM_PROMPT, SQL_USER_PROMPT,
};
use crate::prompts::{PromptTemplate, Slot};
use crate::providers::ai::AiProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of code the model is asked to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// A PostgreSQL query.
    #[default]
    Sql,
    /// A Python function using SQLAlchemy 1.4.
    SqlAlchemy,
}

impl FromStr for OutputTarget {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sql" => Ok(OutputTarget::Sql),
            "sqlalchemy" | "python" => Ok(OutputTarget::SqlAlchemy),
            other => Err(PromptError::Template(format!("unknown output target '{other}'"))),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Sql => f.write_str("sql"),
            OutputTarget::SqlAlchemy => f.write_str("sqlalchemy"),
        }
    }
}

/// Which AI API a [`ProviderConfig`] talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI or any OpenAI-compatible chat completions API.
    #[default]
    OpenAi,
    Gemini,
}

/// Configuration for the chat model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    /// The API URL. Derived from the provider and model when absent.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model_name: String,
    #[serde(default)]
    pub temperature: f32,
}

/// Configuration for the text embedding model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embeddings_api_url")]
    pub api_url: String,
    #[serde(default = "default_embeddings_model")]
    pub model_name: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_embeddings_api_url() -> String {
    DEFAULT_EMBEDDINGS_API_URL.to_string()
}

fn default_embeddings_model() -> String {
    DEFAULT_EMBEDDINGS_MODEL.to_string()
}

/// A validated request to generate code for a question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub question: String,
    pub tables: Vec<String>,
    pub columns: Vec<ColumnSelection>,
    pub namespace: String,
    pub target: OutputTarget,
}

/// The outcome of a generation: the context used, the prompt sent and the code returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub context: String,
    pub user_prompt: String,
    /// The model's answer with surrounding whitespace removed.
    pub code: String,
}

/// The prompts for one output target.
#[derive(Debug, Clone)]
pub(crate) struct TaskPrompts {
    pub(crate) system: String,
    pub(crate) user: PromptTemplate,
}

/// Generates SQL or SQLAlchemy code from natural-language questions.
pub struct SqlGenerator {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) context_provider: Box<dyn ContextProvider>,
    pub(crate) sql_prompts: TaskPrompts,
    pub(crate) sqlalchemy_prompts: TaskPrompts,
}

impl fmt::Debug for SqlGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlGenerator")
            .field("ai_provider", &self.ai_provider)
            .field("context_provider", &self.context_provider)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `SqlGenerator` instances.
///
/// Only the AI provider is required. The context provider defaults to the full
/// rendered schema text, and each output target has default prompts that can
/// be overridden. Templates are validated when the generator is built.
#[derive(Default)]
pub struct SqlGeneratorBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    context_provider: Option<Box<dyn ContextProvider>>,
    system_prompts: Vec<(OutputTarget, String)>,
    user_prompts: Vec<(OutputTarget, String)>,
}

impl SqlGeneratorBuilder {
    /// Creates a new `SqlGeneratorBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlgen::SqlGeneratorBuilder;
    ///
    /// let builder = SqlGeneratorBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn context_provider(mut self, provider: Box<dyn ContextProvider>) -> Self {
        self.context_provider = Some(provider);
        self
    }

    /// Overrides the system prompt for `target`.
    pub fn system_prompt(mut self, target: OutputTarget, prompt: impl Into<String>) -> Self {
        self.system_prompts.push((target, prompt.into()));
        self
    }

    /// Overrides the user prompt template for `target`. It must contain `{question}`.
    pub fn user_prompt_template(
        mut self,
        target: OutputTarget,
        template: impl Into<String>,
    ) -> Self {
        self.user_prompts.push((target, template.into()));
        self
    }

    /// Builds the `SqlGenerator`.
    pub fn build(self) -> Result<SqlGenerator, PromptError> {
        let ai_provider = self.ai_provider.ok_or_else(|| {
            PromptError::MissingAiProvider("an AI provider must be set".to_string())
        })?;
        let context_provider = self
            .context_provider
            .unwrap_or_else(|| Box::new(SchemaTextContext));

        let prompts_for = |target: OutputTarget, system: &str, user: &str| {
            let system = last_override(&self.system_prompts, target).unwrap_or(system);
            let user = last_override(&self.user_prompts, target).unwrap_or(user);
            Ok::<_, PromptError>(TaskPrompts {
                system: system.to_string(),
                user: PromptTemplate::new(user, &[Slot::Question])?,
            })
        };

        Ok(SqlGenerator {
            sql_prompts: prompts_for(OutputTarget::Sql, SQL_SYSTEM_PROMPT, SQL_USER_PROMPT)?,
            sqlalchemy_prompts: prompts_for(
                OutputTarget::SqlAlchemy,
                SQLALCHEMY_SYSTEM_PROMPT,
                SQLALCHEMY_USER_PROMPT,
            )?,
            ai_provider,
            context_provider,
        })
    }
}

fn last_override(overrides: &[(OutputTarget, String)], target: OutputTarget) -> Option<&str> {
    overrides
        .iter()
        .rev()
        .find(|(t, _)| *t == target)
        .map(|(_, p)| p.as_str())
}
