//! # Schema Context Retrieval
//!
//! Indexes one rendered text block per table into a persisted vector
//! collection and retrieves the blocks most similar to a question.
//!
//! A collection lives in its own directory under the persistence root. Its
//! presence is the only state: [`SchemaRetriever::index`] is a no-op when the
//! directory exists, and [`SchemaRetriever::reset`] removes it. Indexing builds
//! into a staging directory that is renamed into place once everything is
//! written, so a failed run never leaves a half-built collection behind.
//!
//! Because an existing collection short-circuits indexing, edits to a schema
//! are not picked up until the collection is reset.

pub mod sql;
pub mod store;

use crate::constants::COLLECTION_DB_FILE;
use crate::errors::PromptError;
use crate::formatter::render_table;
use crate::providers::ai::Embedder;
use crate::schema::Schema;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub use store::{ScoredDocument, VectorStore};

/// Custom error types for indexing and retrieval.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),
    #[error("Embedding generation failed: {0}")]
    Embedding(#[from] PromptError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Collection '{0}' has not been indexed.")]
    CollectionNotFound(String),
    #[error("Invalid collection id '{0}'.")]
    InvalidCollectionId(String),
    #[error("Expected {expected} embeddings but received {got}.")]
    EmbeddingCountMismatch { expected: usize, got: usize },
}

/// The result of an indexing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// A new collection was written with this many documents.
    Indexed(usize),
    /// The collection already existed; nothing was embedded or written.
    AlreadyIndexed,
}

/// The result of a reset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Deleted,
    /// There was no collection to delete.
    NotFound,
}

/// Builds one document per table: the table's rendered block, trimmed.
pub fn schema_documents(schema: &Schema, namespace: &str) -> Vec<String> {
    schema
        .iter()
        .map(|(name, table)| render_table(name, table, namespace).trim().to_string())
        .collect()
}

/// Indexes, queries and deletes persisted schema collections.
#[derive(Clone, Debug)]
pub struct SchemaRetriever {
    persist_dir: PathBuf,
    embedder: Box<dyn Embedder>,
}

impl SchemaRetriever {
    pub fn new(persist_dir: impl Into<PathBuf>, embedder: Box<dyn Embedder>) -> Self {
        Self {
            persist_dir: persist_dir.into(),
            embedder,
        }
    }

    pub fn persist_dir(&self) -> &Path {
        &self.persist_dir
    }

    /// The directory holding `collection_id`.
    pub fn collection_dir(&self, collection_id: &str) -> Result<PathBuf, RetrievalError> {
        validate_collection_id(collection_id)?;
        Ok(self.persist_dir.join(collection_id))
    }

    pub async fn exists(&self, collection_id: &str) -> Result<bool, RetrievalError> {
        let dir = self.collection_dir(collection_id)?;
        Ok(tokio::fs::try_exists(&dir).await?)
    }

    /// Embeds and persists one document per table, unless the collection already exists.
    ///
    /// Writes go to a `.{id}.staging` directory that is renamed into place;
    /// on failure it is removed and the collection stays absent.
    pub async fn index(
        &self,
        schema: &Schema,
        namespace: &str,
        collection_id: &str,
    ) -> Result<IndexOutcome, RetrievalError> {
        let collection_dir = self.collection_dir(collection_id)?;
        if tokio::fs::try_exists(&collection_dir).await? {
            info!("Collection '{collection_id}' already exists; skipping indexing.");
            return Ok(IndexOutcome::AlreadyIndexed);
        }

        let documents = schema_documents(schema, namespace);
        info!(
            "Indexing {} table documents into collection '{collection_id}'.",
            documents.len()
        );
        let inputs: Vec<&str> = documents.iter().map(String::as_str).collect();
        let vectors = self.embedder.embed(&inputs).await?;

        // The store rejects a vector count that differs from the document count.
        let staging_dir = self.persist_dir.join(format!(".{collection_id}.staging"));
        if tokio::fs::try_exists(&staging_dir).await? {
            tokio::fs::remove_dir_all(&staging_dir).await?;
        }
        tokio::fs::create_dir_all(&staging_dir).await?;

        let written = match write_collection(&staging_dir, &documents, &vectors).await {
            Ok(count) => count,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_dir_all(&staging_dir).await {
                    warn!("Failed to remove staging directory: {cleanup}");
                }
                return Err(e);
            }
        };
        tokio::fs::rename(&staging_dir, &collection_dir).await?;

        info!("Collection '{collection_id}' indexed with {written} documents.");
        Ok(IndexOutcome::Indexed(written))
    }

    /// Returns the `k` documents closest to `question`, most similar first.
    pub async fn retrieve_documents(
        &self,
        question: &str,
        collection_id: &str,
        k: usize,
    ) -> Result<Vec<ScoredDocument>, RetrievalError> {
        let collection_dir = self.collection_dir(collection_id)?;
        if !tokio::fs::try_exists(&collection_dir).await? {
            return Err(RetrievalError::CollectionNotFound(collection_id.to_string()));
        }

        let query_vector = self
            .embedder
            .embed(&[question])
            .await?
            .into_iter()
            .next()
            .ok_or(RetrievalError::EmbeddingCountMismatch {
                expected: 1,
                got: 0,
            })?;

        let store = VectorStore::open(&collection_dir.join(COLLECTION_DB_FILE)).await?;
        store.search(&query_vector, k).await
    }

    /// Like [`Self::retrieve_documents`], joining the texts with a blank line.
    pub async fn retrieve(
        &self,
        question: &str,
        collection_id: &str,
        k: usize,
    ) -> Result<String, RetrievalError> {
        let documents = self.retrieve_documents(question, collection_id, k).await?;
        Ok(documents
            .into_iter()
            .map(|d| d.content)
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    /// Deletes the collection directory.
    pub async fn reset(&self, collection_id: &str) -> Result<ResetOutcome, RetrievalError> {
        let collection_dir = self.collection_dir(collection_id)?;
        if !tokio::fs::try_exists(&collection_dir).await? {
            info!("Collection '{collection_id}' does not exist; nothing to delete.");
            return Ok(ResetOutcome::NotFound);
        }
        tokio::fs::remove_dir_all(&collection_dir).await?;
        info!("Collection '{collection_id}' deleted.");
        Ok(ResetOutcome::Deleted)
    }
}

async fn write_collection(
    dir: &Path,
    documents: &[String],
    vectors: &[Vec<f32>],
) -> Result<usize, RetrievalError> {
    let store = VectorStore::open(&dir.join(COLLECTION_DB_FILE)).await?;
    store.insert_documents(documents, vectors).await
}

fn validate_collection_id(collection_id: &str) -> Result<(), RetrievalError> {
    let valid = !collection_id.is_empty()
        && !collection_id.starts_with('.')
        && collection_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(RetrievalError::InvalidCollectionId(collection_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_ids_cannot_escape_the_persist_dir() {
        assert!(validate_collection_id("schema_tables").is_ok());
        assert!(validate_collection_id("b2b0bef6-545f.v2").is_ok());
        assert!(validate_collection_id("").is_err());
        assert!(validate_collection_id("..").is_err());
        assert!(validate_collection_id("a/b").is_err());
        assert!(validate_collection_id(".hidden").is_err());
    }
}
