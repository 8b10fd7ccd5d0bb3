//! # Prompt Context Providers
//!
//! The text that describes the database to the model comes from one of two
//! interchangeable providers: the rendered text of the selected tables, or the
//! table blocks most similar to the question in a persisted vector collection.

use crate::errors::PromptError;
use crate::formatter::render;
use crate::retrieval::{IndexOutcome, SchemaRetriever};
use crate::schema::Schema;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;
use tracing::info;

/// Everything a provider may draw on to build context.
#[derive(Debug, Clone, Copy)]
pub struct ContextRequest<'a> {
    pub schema: &'a Schema,
    pub tables: &'a [String],
    pub namespace: &'a str,
    pub question: &'a str,
}

/// A source of schema context for the prompt.
#[async_trait]
pub trait ContextProvider: Send + Sync + Debug + DynClone {
    async fn context(&self, request: &ContextRequest<'_>) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(ContextProvider);

/// Renders the selected tables in full.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaTextContext;

#[async_trait]
impl ContextProvider for SchemaTextContext {
    async fn context(&self, request: &ContextRequest<'_>) -> Result<String, PromptError> {
        Ok(render(request.schema, request.tables, request.namespace))
    }
}

/// Retrieves the table blocks most similar to the question.
///
/// The schema is indexed first; an existing collection is left untouched.
#[derive(Debug, Clone)]
pub struct RetrievalContext {
    retriever: SchemaRetriever,
    collection: String,
    top_k: usize,
}

impl RetrievalContext {
    pub fn new(retriever: SchemaRetriever, collection: impl Into<String>, top_k: usize) -> Self {
        Self {
            retriever,
            collection: collection.into(),
            top_k,
        }
    }
}

#[async_trait]
impl ContextProvider for RetrievalContext {
    async fn context(&self, request: &ContextRequest<'_>) -> Result<String, PromptError> {
        let outcome = self
            .retriever
            .index(request.schema, request.namespace, &self.collection)
            .await?;
        if let IndexOutcome::Indexed(count) = outcome {
            info!("Indexed {count} tables before retrieval.");
        }
        Ok(self
            .retriever
            .retrieve(request.question, &self.collection, self.top_k)
            .await?)
    }
}
