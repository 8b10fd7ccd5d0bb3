//! # Table Detector Tests

use sqlgen::{detect, Schema};
use sqlgen_test_utils::shop_schema;

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_detect_is_case_insensitive() {
    let schema = shop_schema();
    assert_eq!(detect("Quais CLIENTES compraram", &schema), names(&["clientes"]));
}

#[test]
fn test_detect_requires_exact_tokens() {
    let schema = shop_schema();
    assert!(detect("clientesx", &schema).is_empty());
    assert!(detect("cliente", &schema).is_empty());
    // Punctuation is part of the token.
    assert!(detect("quais clientes?", &schema).is_empty());
}

#[test]
fn test_detect_finds_every_mentioned_table_once_in_schema_order() {
    let schema = shop_schema();
    let found = detect("clientes dos pedidos e clientes\tcom\npedidos", &schema);
    assert_eq!(found, names(&["pedidos", "clientes"]));
}

#[test]
fn test_detect_matches_mixed_case_table_names() {
    let json = r#"{"NotaFiscal": {"columns": []}}"#;
    let schema = Schema::from_json(json).unwrap();
    assert_eq!(detect("listar notafiscal emitidas", &schema), names(&["NotaFiscal"]));
}

#[test]
fn test_detect_empty_question() {
    assert!(detect("   ", &shop_schema()).is_empty());
}
