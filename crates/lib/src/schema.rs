//! # Schema Document Model
//!
//! The structured description of a relational database that users upload as
//! JSON: a mapping from table name to its comment and ordered columns.

use crate::errors::PromptError;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::path::Path;

/// A single column of a table, in the order it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    /// Human-readable target of a foreign key, e.g. `clientes.id`.
    #[serde(default)]
    pub references: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A table description: an optional comment and its ordered columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub comment: Option<String>,
    pub columns: Vec<Column>,
}

/// A database schema keyed by table name, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    tables: IndexMap<String, Table>,
}

impl Schema {
    /// Parses a schema from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, PromptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a schema document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PromptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn get(&self, table: &str) -> Option<&Table> {
        self.tables.get(table)
    }

    /// All table names, in the order the document lists them.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Table)> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Column names of a table, or an empty list for an unknown table.
    pub fn column_names(&self, table: &str) -> Vec<String> {
        self.tables
            .get(table)
            .map(|t| t.columns.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_column_field_is_a_parse_error() {
        let json = r#"{"t": {"columns": [{"name": "id", "is_primary_key": true, "is_foreign_key": false}]}}"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(matches!(err, PromptError::SchemaParse(_)));
    }

    #[test]
    fn tables_keep_document_order() {
        let json = r#"{"pedidos": {"columns": []}, "clientes": {"columns": []}, "itens": {"columns": []}}"#;
        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.table_names(), vec!["pedidos", "clientes", "itens"]);
    }

    #[test]
    fn null_comment_and_references_are_absent() {
        let json = r#"{"t": {"comment": null, "columns": [{"name": "id", "data_type": "int", "is_primary_key": true, "is_foreign_key": false, "references": null, "comment": null}]}}"#;
        let schema = Schema::from_json(json).unwrap();
        let table = schema.get("t").unwrap();
        assert_eq!(table.comment, None);
        assert_eq!(table.columns[0].references, None);
        assert_eq!(schema.column_names("t"), vec!["id".to_string()]);
        assert!(schema.column_names("missing").is_empty());
    }
}
