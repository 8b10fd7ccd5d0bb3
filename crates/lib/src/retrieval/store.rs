use super::{sql, RetrievalError};
use std::fmt::{self, Debug};
use std::path::Path;
use tracing::{debug, info};
use turso::{params, Database, Value as TursoValue};

/// A document returned by a similarity search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub content: String,
    /// Cosine distance to the query; smaller is closer.
    pub distance: f64,
}

/// A single collection's vector database file.
pub struct VectorStore {
    db: Database,
}

impl Debug for VectorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorStore").finish_non_exhaustive()
    }
}

impl VectorStore {
    /// Opens (creating if needed) the database at `path` and ensures its table exists.
    pub async fn open(path: &Path) -> Result<Self, RetrievalError> {
        let db = turso::Builder::new_local(&path.to_string_lossy())
            .build()
            .await?;
        let conn = db.connect()?;
        conn.execute(sql::CREATE_DOCUMENTS_TABLE, ()).await?;
        Ok(Self { db })
    }

    /// Writes documents and their vectors in a single transaction.
    pub async fn insert_documents(
        &self,
        documents: &[String],
        vectors: &[Vec<f32>],
    ) -> Result<usize, RetrievalError> {
        if documents.len() != vectors.len() {
            return Err(RetrievalError::EmbeddingCountMismatch {
                expected: documents.len(),
                got: vectors.len(),
            });
        }

        let conn = self.db.connect()?;
        conn.execute("BEGIN TRANSACTION", ()).await?;
        for (position, (content, vector)) in documents.iter().zip(vectors).enumerate() {
            conn.execute(
                &sql::insert_document(vector),
                params![position as i64, content.clone()],
            )
            .await?;
        }
        conn.execute("COMMIT", ()).await?;

        info!("Stored {} documents.", documents.len());
        Ok(documents.len())
    }

    /// Returns up to `limit` documents ordered by cosine distance to `query_vector`.
    pub async fn search(
        &self,
        query_vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, RetrievalError> {
        let conn = self.db.connect()?;
        debug!(limit, "Executing vector search query.");
        let mut rows = conn
            .query(&sql::nearest_documents(query_vector, limit), ())
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            let content = match row.get_value(0)? {
                TursoValue::Text(s) => s,
                _ => String::new(),
            };
            let distance = match row.get_value(1)? {
                TursoValue::Real(f) => f,
                TursoValue::Integer(i) => i as f64,
                _ => 0.0,
            };
            results.push(ScoredDocument { content, distance });
        }
        Ok(results)
    }

    pub async fn count(&self) -> Result<usize, RetrievalError> {
        let conn = self.db.connect()?;
        let mut rows = conn.query(sql::COUNT_DOCUMENTS, ()).await?;
        let count = match rows.next().await? {
            Some(row) => match row.get_value(0)? {
                TursoValue::Integer(i) => i as usize,
                _ => 0,
            },
            None => 0,
        };
        Ok(count)
    }
}
