//! # Application Configuration
//!
//! Loads the `sqlgen` configuration from layered sources:
//!
//! 1. programmatic defaults,
//! 2. an optional YAML file (`config.yml` in the working directory, or an explicit path),
//!    with `${VAR}` placeholders substituted from the environment,
//! 3. `SQLGEN_`-prefixed environment variables, using `__` for nesting
//!    (e.g. `SQLGEN_LLM__MODEL_NAME`, `SQLGEN_CONTEXT__TOP_K`).
//!
//! API keys that remain unset fall back to `OPENAI_API_KEY`.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use sqlgen::constants::{
    API_KEY_ENV, DEFAULT_CHAT_MODEL, DEFAULT_COLLECTION, DEFAULT_EMBEDDINGS_API_URL,
    DEFAULT_EMBEDDINGS_MODEL, DEFAULT_PERSIST_DIR, DEFAULT_TOP_K,
};
use sqlgen::{EmbeddingConfig, ProviderConfig};
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// The default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// How the schema is described to the model.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContextMode {
    /// The full rendered text of the selected tables.
    Schema,
    /// The table blocks most similar to the question, from the vector collection.
    Retrieval,
}

/// Settings for context construction and the vector collection.
#[derive(Debug, Deserialize, Clone)]
pub struct ContextConfig {
    pub mode: ContextMode,
    pub persist_dir: String,
    pub collection: String,
    pub top_k: usize,
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The chat model used for generation.
    pub llm: ProviderConfig,
    /// The embedding model used by retrieval.
    pub embedding: EmbeddingConfig,
    pub context: ContextConfig,
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration.
///
/// An explicit `config_path` must exist; the default `config.yml` is optional.
pub fn get_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults.
        .set_default("llm.provider", "openai")?
        .set_default("llm.model_name", DEFAULT_CHAT_MODEL)?
        .set_default("llm.temperature", 0.0)?
        .set_default("embedding.api_url", DEFAULT_EMBEDDINGS_API_URL)?
        .set_default("embedding.model_name", DEFAULT_EMBEDDINGS_MODEL)?
        .set_default("context.mode", "schema")?
        .set_default("context.persist_dir", DEFAULT_PERSIST_DIR)?
        .set_default("context.collection", DEFAULT_COLLECTION)?
        .set_default("context.top_k", DEFAULT_TOP_K as i64)?;

    // Layer 2: Config file.
    let path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);
    match read_and_substitute(path)? {
        Some(content) => {
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if config_path.is_some() => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{path}'."
            )));
        }
        None => {}
    }

    let settings = builder
        // Layer 3: Prefixed environment variables for overrides.
        .add_source(
            Environment::with_prefix("SQLGEN")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Both models share one credential unless configured separately.
    let fallback_key = env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
    if config.llm.api_key.as_deref().map_or(true, str::is_empty) {
        config.llm.api_key = fallback_key.clone();
    }
    if config.embedding.api_key.as_deref().map_or(true, str::is_empty) {
        config.embedding.api_key = fallback_key;
    }

    Ok(config)
}
