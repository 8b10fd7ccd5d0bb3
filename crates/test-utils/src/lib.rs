use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use sqlgen::errors::PromptError;
use sqlgen::providers::ai::{AiProvider, Embedder};
use sqlgen::Schema;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// --- Test Setup ---

/// A helper struct giving each test its own persistence directory.
pub struct TestSetup {
    pub dir: TempDir,
}

impl TestSetup {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn persist_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("vector_store")
    }
}

// --- Fixtures ---

/// The two-table shop schema used across tests.
pub fn shop_schema_json() -> String {
    json!({
        "pedidos": {
            "comment": "Pedidos de clientes",
            "columns": [
                {"name": "id", "data_type": "integer", "is_primary_key": true, "is_foreign_key": false, "references": null, "comment": "ID"},
                {"name": "cliente_id", "data_type": "integer", "is_primary_key": false, "is_foreign_key": true, "references": "clientes.id", "comment": "FK cliente"}
            ]
        },
        "clientes": {
            "comment": "  Cadastro de clientes  ",
            "columns": [
                {"name": "id", "data_type": "integer", "is_primary_key": true, "is_foreign_key": false, "references": null, "comment": "ID do cliente"},
                {"name": "nome", "data_type": "text", "is_primary_key": false, "is_foreign_key": false, "references": null}
            ]
        }
    })
    .to_string()
}

pub fn shop_schema() -> Schema {
    Schema::from_json(&shop_schema_json()).expect("fixture schema is valid")
}

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
        )))
    }
}

// --- Mock Embedder ---

/// Embeds text as keyword counts over a fixed vocabulary.
///
/// Every vector also carries a constant component so that texts without any
/// keyword still have a well-defined cosine distance.
#[derive(Clone, Debug)]
pub struct MockEmbedder {
    vocabulary: Vec<String>,
    calls: Arc<Mutex<Vec<usize>>>,
}

impl MockEmbedder {
    pub fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.to_lowercase()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of texts embedded by each call, in call order.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let mut vector: Vec<f32> = self
            .vocabulary
            .iter()
            .map(|word| lowered.matches(word.as_str()).count() as f32 * 10.0)
            .collect();
        vector.push(0.1);
        vector
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, PromptError> {
        self.calls.lock().unwrap().push(inputs.len());
        Ok(inputs.iter().map(|text| self.vectorize(text)).collect())
    }
}

/// An embedder whose every call fails, for error-propagation tests.
#[derive(Clone, Debug, Default)]
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _inputs: &[&str]) -> Result<Vec<Vec<f32>>, PromptError> {
        Err(PromptError::AiApi("embedding service unavailable".to_string()))
    }
}
