//! # Natural Language to SQL
//!
//! This crate turns a JSON description of a database schema and a question in
//! Portuguese into a SQL query (or a SQLAlchemy function) written by a
//! configurable AI provider.
//!
//! The schema is described to the model either as the rendered text of the
//! selected tables or, in retrieval mode, as the table blocks most similar to
//! the question in a persisted vector collection.

pub mod artifact;
pub mod constants;
pub mod context;
pub mod detector;
pub mod errors;
pub mod formatter;
pub mod prompts;
pub mod providers;
pub mod retrieval;
pub mod schema;
pub mod session;
pub mod types;

pub use artifact::Artifact;
pub use context::{ContextProvider, ContextRequest, RetrievalContext, SchemaTextContext};
pub use detector::detect;
pub use errors::PromptError;
pub use formatter::{render, render_column_selection, render_table, ColumnSelection};
pub use retrieval::{IndexOutcome, ResetOutcome, RetrievalError, SchemaRetriever};
pub use schema::{Column, Schema, Table};
pub use session::{Session, SessionError};
pub use types::{
    EmbeddingConfig, Generation, GenerationRequest, OutputTarget, ProviderConfig, ProviderKind,
    SqlGenerator, SqlGeneratorBuilder,
};

use prompts::PromptSlots;
use tracing::{debug, info};

impl SqlGenerator {
    /// Generates code for `request` against `schema`.
    ///
    /// Builds the context with the configured provider, fills the target's
    /// prompt template and makes a single call to the AI provider. Provider
    /// failures are returned as-is; nothing is retried.
    pub async fn generate(
        &self,
        schema: &Schema,
        request: &GenerationRequest,
    ) -> Result<Generation, PromptError> {
        info!(
            "[generate] target: {}, tables: {:?}",
            request.target, request.tables
        );

        let context = self
            .context_provider
            .context(&ContextRequest {
                schema,
                tables: &request.tables,
                namespace: &request.namespace,
                question: &request.question,
            })
            .await?;
        let columns = render_column_selection(&request.columns, &request.namespace);

        let prompts = match request.target {
            OutputTarget::Sql => &self.sql_prompts,
            OutputTarget::SqlAlchemy => &self.sqlalchemy_prompts,
        };
        let user_prompt = prompts.user.render(&PromptSlots {
            schema: &context,
            columns: &columns,
            namespace: &request.namespace,
            question: &request.question,
        });

        debug!(system_prompt = %prompts.system, user_prompt = %user_prompt, "--> Sending prompts to AI Provider");
        let raw_response = self
            .ai_provider
            .generate(&prompts.system, &user_prompt)
            .await?;
        debug!("<-- Response from AI: {}", &raw_response);

        Ok(Generation {
            context,
            user_prompt,
            code: raw_response.trim().to_string(),
        })
    }
}
