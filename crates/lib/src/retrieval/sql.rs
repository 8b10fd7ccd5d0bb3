//! # Vector Collection SQL
//!
//! SQL statements for the on-disk collection database. Vectors are inlined as
//! `vector32('[...]')` literals because the engine's vector functions expect a
//! literal rather than a bound parameter.

/// Creates the documents table of a collection.
pub const CREATE_DOCUMENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS documents (
    position INTEGER PRIMARY KEY,
    content TEXT NOT NULL,
    embedding BLOB NOT NULL
)";

/// Counts the documents of a collection.
pub const COUNT_DOCUMENTS: &str = "SELECT COUNT(*) FROM documents";

/// Formats a vector as a `vector32` literal.
pub fn vector_literal(vector: &[f32]) -> String {
    format!(
        "vector32('[{}]')",
        vector
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// Returns the insert statement for one document; expects `position` and `content` parameters.
pub fn insert_document(vector: &[f32]) -> String {
    format!(
        "INSERT INTO documents (position, content, embedding) VALUES (?, ?, {})",
        vector_literal(vector)
    )
}

/// Returns the k-nearest-neighbour query by cosine distance, closest first.
pub fn nearest_documents(query_vector: &[f32], limit: usize) -> String {
    format!(
        "SELECT content, vector_distance_cos(embedding, {}) AS distance
         FROM documents
         ORDER BY distance ASC, position ASC
         LIMIT {limit}",
        vector_literal(query_vector)
    )
}
