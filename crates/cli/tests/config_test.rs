//! # Configuration Tests
//!
//! Checks the layering of defaults, the YAML file and `SQLGEN_` environment
//! variables, and the `OPENAI_API_KEY` fallback.

use sqlgen::constants::{DEFAULT_COLLECTION, DEFAULT_PERSIST_DIR, DEFAULT_TOP_K};
use sqlgen::ProviderKind;
use sqlgen_cli::config::{get_config, ConfigError, ContextMode};
use std::env;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

// Environment variables are process-global, so tests touching them run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    for (key, _) in env::vars() {
        if key.starts_with("SQLGEN_") {
            env::remove_var(key);
        }
    }
    env::remove_var("OPENAI_API_KEY");
    env::remove_var("TEST_SQLGEN_KEY");
}

#[test]
fn test_get_config_defaults() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let config = get_config(None).expect("Defaults should load");

    assert_eq!(config.llm.provider, ProviderKind::OpenAi);
    assert_eq!(config.llm.model_name, "gpt-3.5-turbo");
    assert_eq!(config.llm.temperature, 0.0);
    assert_eq!(config.llm.api_key, None);
    assert_eq!(config.embedding.model_name, "text-embedding-3-small");
    assert_eq!(config.context.mode, ContextMode::Schema);
    assert_eq!(config.context.persist_dir, DEFAULT_PERSIST_DIR);
    assert_eq!(config.context.collection, DEFAULT_COLLECTION);
    assert_eq!(config.context.top_k, DEFAULT_TOP_K);
}

#[test]
fn test_env_vars_override_defaults() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    env::set_var("SQLGEN_LLM__PROVIDER", "gemini");
    env::set_var("SQLGEN_LLM__MODEL_NAME", "gemini-2.0-flash");
    env::set_var("SQLGEN_CONTEXT__MODE", "retrieval");
    env::set_var("SQLGEN_CONTEXT__TOP_K", "2");

    let config = get_config(None).expect("Configuration should load");

    assert_eq!(config.llm.provider, ProviderKind::Gemini);
    assert_eq!(config.llm.model_name, "gemini-2.0-flash");
    assert_eq!(config.context.mode, ContextMode::Retrieval);
    assert_eq!(config.context.top_k, 2);

    clear_env_vars();
}

#[test]
fn test_openai_api_key_fills_both_models() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    env::set_var("OPENAI_API_KEY", "sk-shared");
    env::set_var("SQLGEN_EMBEDDING__API_KEY", "sk-embed");

    let config = get_config(None).expect("Configuration should load");

    assert_eq!(config.llm.api_key.as_deref(), Some("sk-shared"));
    assert_eq!(config.embedding.api_key.as_deref(), Some("sk-embed"));

    clear_env_vars();
}

#[test]
fn test_config_file_with_substitution() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(
        &path,
        r#"
llm:
  provider: openai
  api_url: "http://localhost:1234/v1/chat/completions"
  api_key: "${TEST_SQLGEN_KEY}"
  model_name: local-model
context:
  collection: loja
  top_k: 3
"#,
    )
    .unwrap();
    env::set_var("TEST_SQLGEN_KEY", "from-env");

    let config = get_config(path.to_str()).expect("Configuration file should load");

    assert_eq!(
        config.llm.api_url.as_deref(),
        Some("http://localhost:1234/v1/chat/completions")
    );
    assert_eq!(config.llm.api_key.as_deref(), Some("from-env"));
    assert_eq!(config.llm.model_name, "local-model");
    assert_eq!(config.context.collection, "loja");
    assert_eq!(config.context.top_k, 3);
    // Untouched keys keep their defaults.
    assert_eq!(config.context.mode, ContextMode::Schema);

    clear_env_vars();
}

#[test]
fn test_missing_explicit_config_file_is_an_error() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let result = get_config(Some("/definitely/not/here/config.yml"));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}
