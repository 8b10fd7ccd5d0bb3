//! # Schema Formatter
//!
//! Turns a [`Schema`] into the human-readable text that is embedded in prompts
//! and stored as retrieval documents. The output is a pure function of the
//! schema, the table selection and the namespace.

use crate::constants::{ALL_COLUMNS, DEFAULT_COMMENT};
use crate::schema::{Column, Schema, Table};

/// A table together with the columns the user chose to display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    pub table: String,
    pub columns: Vec<String>,
}

impl ColumnSelection {
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }
}

/// Qualifies a table name with the namespace, if any.
pub fn qualified_name(namespace: &str, table: &str) -> String {
    if namespace.is_empty() {
        table.to_string()
    } else {
        format!("{namespace}.{table}")
    }
}

/// Renders the selected tables of `schema`, in selection order.
///
/// Names absent from the schema are skipped. Every table block is followed by
/// a blank line.
pub fn render(schema: &Schema, selected_tables: &[String], namespace: &str) -> String {
    let mut lines = Vec::new();
    for name in selected_tables {
        let Some(table) = schema.get(name) else {
            continue;
        };
        push_table_lines(&mut lines, name, table, namespace);
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Renders a single table block without the trailing blank line.
pub fn render_table(name: &str, table: &Table, namespace: &str) -> String {
    let mut lines = Vec::new();
    push_table_lines(&mut lines, name, table, namespace);
    lines.join("\n")
}

/// Renders the user's column choices as one line per table.
pub fn render_column_selection(selections: &[ColumnSelection], namespace: &str) -> String {
    selections
        .iter()
        .map(|s| {
            let columns = if s.columns.is_empty() {
                ALL_COLUMNS.to_string()
            } else {
                s.columns.join(", ")
            };
            format!("- {}: {columns}\n", qualified_name(namespace, &s.table))
        })
        .collect()
}

fn push_table_lines(lines: &mut Vec<String>, name: &str, table: &Table, namespace: &str) {
    lines.push(format!(
        "Tabela: {} ({})",
        qualified_name(namespace, name),
        comment_or_default(table.comment.as_deref())
    ));
    lines.extend(table.columns.iter().map(render_column));
}

fn render_column(column: &Column) -> String {
    let mut annotations = Vec::with_capacity(2);
    if column.is_primary_key {
        annotations.push("PK".to_string());
    }
    if column.is_foreign_key {
        if let Some(target) = column.references.as_deref().filter(|r| !r.is_empty()) {
            annotations.push(format!("FK → {target}"));
        }
    }
    let annotations = if annotations.is_empty() {
        String::new()
    } else {
        format!(" ({})", annotations.join(" / "))
    };

    format!(
        "- {} ({}){annotations} — {}",
        column.name,
        column.data_type,
        comment_or_default(column.comment.as_deref())
    )
}

fn comment_or_default(comment: Option<&str>) -> &str {
    comment.unwrap_or(DEFAULT_COMMENT).trim()
}
