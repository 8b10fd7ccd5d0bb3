//! # Table Detector
//!
//! Finds the tables a question mentions by name. The result only seeds a
//! default selection, so matching is deliberately simple: whole lowercase
//! whitespace-separated tokens, no stemming and no substrings.

use crate::schema::Schema;
use std::collections::HashSet;

/// Returns every table in `schema` whose lowercased name is a token of
/// `question`, in schema order. Each table appears at most once.
pub fn detect(question: &str, schema: &Schema) -> Vec<String> {
    let lowered = question.to_lowercase();
    let tokens: HashSet<&str> = lowered.split_whitespace().collect();

    schema
        .iter()
        .filter(|(name, _)| tokens.contains(name.to_lowercase().as_str()))
        .map(|(name, _)| name.clone())
        .collect()
}
