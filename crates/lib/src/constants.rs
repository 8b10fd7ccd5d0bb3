//! # Shared Constants
//!
//! Defaults shared by the library and the `sqlgen` binary. Keeping them in one
//! place avoids "magic strings" drifting between the two.

/// Default comment used when a table or column carries none.
pub const DEFAULT_COMMENT: &str = "Sem comentário";

/// Text used in the column-selection block when no column was chosen for a table.
pub const ALL_COLUMNS: &str = "todas as colunas";

/// The default root directory for persisted vector collections.
pub const DEFAULT_PERSIST_DIR: &str = "db/vector_store";

/// The default collection name for schema documents.
pub const DEFAULT_COLLECTION: &str = "schema_tables";

/// The name of the database file inside a collection directory.
pub const COLLECTION_DB_FILE: &str = "collection.db";

/// Number of documents returned by a retrieval when none is requested.
pub const DEFAULT_TOP_K: usize = 4;

/// The default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_CHAT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// The default OpenAI-compatible embeddings endpoint.
pub const DEFAULT_EMBEDDINGS_API_URL: &str = "https://api.openai.com/v1/embeddings";

/// The default embeddings model.
pub const DEFAULT_EMBEDDINGS_MODEL: &str = "text-embedding-3-small";

/// The environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// File name of the downloadable artifact.
pub const ARTIFACT_FILE_NAME: &str = "consulta.sql";

/// MIME type of the downloadable artifact.
pub const ARTIFACT_MIME: &str = "text/sql";
