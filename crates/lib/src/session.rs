//! # Interactive Session State
//!
//! A caller-owned record of what the user has typed and chosen so far. The
//! caller decides its lifetime; formatting and detection stay pure functions.

use crate::detector::detect;
use crate::formatter::ColumnSelection;
use crate::schema::Schema;
use crate::types::{GenerationRequest, OutputTarget};
use std::collections::HashMap;
use thiserror::Error;

/// Preconditions that block a generation request. These are warnings for the
/// user, not failures of the system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Digite uma pergunta para gerar a SQL.")]
    MissingQuestion,
    #[error("Selecione ao menos uma tabela.")]
    NoTablesSelected,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    question: String,
    namespace: String,
    detected_tables: Vec<String>,
    selected_tables: Vec<String>,
    columns: HashMap<String, Vec<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the question, detections and every selection. The namespace is kept.
    pub fn clear(&mut self) {
        self.question.clear();
        self.detected_tables.clear();
        self.selected_tables.clear();
        self.columns.clear();
    }

    /// Stores the question. The first non-empty question also seeds the table
    /// selection from the tables it mentions; later edits leave it alone.
    pub fn set_question(&mut self, question: impl Into<String>, schema: &Schema) {
        self.question = question.into();
        if self.detected_tables.is_empty() && !self.question.is_empty() {
            self.detected_tables = detect(&self.question, schema);
            if self.selected_tables.is_empty() {
                self.selected_tables = self.detected_tables.clone();
            }
        }
    }

    /// Replaces the table selection, dropping column choices for tables no longer selected.
    pub fn set_selection(&mut self, tables: Vec<String>) {
        self.columns.retain(|table, _| tables.contains(table));
        self.selected_tables = tables;
    }

    /// Records the columns chosen for `table`. An empty list means all columns.
    pub fn set_columns(&mut self, table: impl Into<String>, columns: Vec<String>) {
        self.columns.insert(table.into(), columns);
    }

    pub fn set_namespace(&mut self, namespace: &str) {
        self.namespace = namespace.trim().to_string();
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn detected_tables(&self) -> &[String] {
        &self.detected_tables
    }

    pub fn selected_tables(&self) -> &[String] {
        &self.selected_tables
    }

    /// Column choices for each selected table, in selection order.
    pub fn column_selections(&self) -> Vec<ColumnSelection> {
        self.selected_tables
            .iter()
            .map(|table| {
                ColumnSelection::new(
                    table.clone(),
                    self.columns.get(table).cloned().unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Builds a generation request, or reports the missing input.
    pub fn request(&self, target: OutputTarget) -> Result<GenerationRequest, SessionError> {
        if self.question.trim().is_empty() {
            return Err(SessionError::MissingQuestion);
        }
        if self.selected_tables.is_empty() {
            return Err(SessionError::NoTablesSelected);
        }
        Ok(GenerationRequest {
            question: self.question.clone(),
            tables: self.selected_tables.clone(),
            columns: self.column_selections(),
            namespace: self.namespace.clone(),
            target,
        })
    }
}
