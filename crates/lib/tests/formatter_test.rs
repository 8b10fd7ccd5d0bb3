//! # Schema Formatter Tests
//!
//! Validates the text rendering of schemas: table order, annotations, comments,
//! namespaces and the column-selection block.

use sqlgen::{
    formatter::qualified_name, render, render_column_selection, render_table, ColumnSelection,
    Schema,
};
use sqlgen_test_utils::shop_schema;

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn column_json(name: &str, pk: bool, fk: bool, references: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "data_type": "integer",
        "is_primary_key": pk,
        "is_foreign_key": fk,
        "references": references,
        "comment": "c"
    })
}

fn single_column_schema(column: serde_json::Value) -> Schema {
    let json = serde_json::json!({ "t": { "comment": "T", "columns": [column] } });
    Schema::from_json(&json.to_string()).unwrap()
}

#[test]
fn test_render_matches_reference_example() {
    let json = r#"{"pedidos": {"comment": "Pedidos de clientes", "columns":[{"name":"id","data_type":"integer","is_primary_key":true,"is_foreign_key":false,"references":null,"comment":"ID"},{"name":"cliente_id","data_type":"integer","is_primary_key":false,"is_foreign_key":true,"references":"clientes.id","comment":"FK cliente"}]}}"#;
    let schema = Schema::from_json(json).unwrap();

    let text = render(&schema, &names(&["pedidos"]), "shop");

    assert_eq!(
        text,
        "Tabela: shop.pedidos (Pedidos de clientes)\n\
         - id (integer) (PK) — ID\n\
         - cliente_id (integer) (FK → clientes.id) — FK cliente\n"
    );
}

#[test]
fn test_render_follows_selection_order_and_skips_unknown_tables() {
    let schema = shop_schema();

    let text = render(&schema, &names(&["pedidos", "fantasma", "clientes"]), "");

    let headers: Vec<&str> = text.lines().filter(|l| l.starts_with("Tabela:")).collect();
    assert_eq!(
        headers,
        vec![
            "Tabela: pedidos (Pedidos de clientes)",
            "Tabela: clientes (Cadastro de clientes)"
        ]
    );
    assert!(!text.contains("fantasma"));

    let reversed = render(&schema, &names(&["clientes", "pedidos"]), "");
    assert!(reversed.find("Tabela: clientes").unwrap() < reversed.find("Tabela: pedidos").unwrap());
}

#[test]
fn test_all_tables_render_in_document_order() {
    let json = r#"{"pedidos": {"columns": []}, "clientes": {"columns": []}, "avaliacoes": {"columns": []}}"#;
    let schema = Schema::from_json(json).unwrap();

    let text = render(&schema, &schema.table_names(), "");

    let headers: Vec<&str> = text.lines().filter(|l| l.starts_with("Tabela:")).collect();
    assert_eq!(
        headers,
        vec![
            "Tabela: pedidos (Sem comentário)",
            "Tabela: clientes (Sem comentário)",
            "Tabela: avaliacoes (Sem comentário)"
        ]
    );
}

#[test]
fn test_render_separates_tables_with_one_blank_line() {
    let schema = shop_schema();
    let text = render(&schema, &names(&["pedidos", "clientes"]), "");
    assert!(text.contains("— FK cliente\n\nTabela: clientes"));
    assert!(!text.contains("\n\n\n"));
}

#[test]
fn test_render_only_unknown_tables_is_empty() {
    let schema = shop_schema();
    assert_eq!(render(&schema, &names(&["nada", "nenhuma"]), "shop"), "");
    assert_eq!(render(&schema, &[], "shop"), "");
}

#[test]
fn test_render_repeats_duplicate_selections() {
    let schema = shop_schema();
    let text = render(&schema, &names(&["clientes", "clientes"]), "");
    assert_eq!(text.matches("Tabela: clientes").count(), 2);
}

#[test]
fn test_primary_key_only_annotation() {
    let schema = single_column_schema(column_json("id", true, false, None));
    let text = render(&schema, &names(&["t"]), "");
    assert!(text.contains("- id (integer) (PK) — c"));
}

#[test]
fn test_primary_and_foreign_key_annotation() {
    let schema = single_column_schema(column_json("id", true, true, Some("outra.id")));
    let text = render(&schema, &names(&["t"]), "");
    assert!(text.contains("- id (integer) (PK / FK → outra.id) — c"));
}

#[test]
fn test_no_annotation_without_keys() {
    let schema = single_column_schema(column_json("valor", false, false, None));
    let text = render(&schema, &names(&["t"]), "");
    assert!(text.contains("- valor (integer) — c"));
}

#[test]
fn test_foreign_key_without_reference_is_not_annotated() {
    let schema = single_column_schema(column_json("ref", false, true, None));
    let text = render(&schema, &names(&["t"]), "");
    assert!(text.contains("- ref (integer) — c"));
}

#[test]
fn test_missing_comments_default_and_comments_are_trimmed() {
    let json = r#"{"t": {"columns": [{"name": "a", "data_type": "text", "is_primary_key": false, "is_foreign_key": false, "comment": "  espaços  "}, {"name": "b", "data_type": "text", "is_primary_key": false, "is_foreign_key": false}]}}"#;
    let schema = Schema::from_json(json).unwrap();

    let text = render(&schema, &names(&["t"]), "");

    assert_eq!(
        text,
        "Tabela: t (Sem comentário)\n- a (text) — espaços\n- b (text) — Sem comentário\n"
    );
}

#[test]
fn test_render_table_has_no_trailing_blank_line() {
    let schema = shop_schema();
    let table = schema.get("clientes").unwrap();
    let block = render_table("clientes", table, "ns");
    assert_eq!(
        block,
        "Tabela: ns.clientes (Cadastro de clientes)\n- id (integer) (PK) — ID do cliente\n- nome (text) — Sem comentário"
    );
}

#[test]
fn test_qualified_name() {
    assert_eq!(qualified_name("", "t"), "t");
    assert_eq!(
        qualified_name("b2b0bef6-545f-11f0-ad81-86f9ff72f4df", "t"),
        "b2b0bef6-545f-11f0-ad81-86f9ff72f4df.t"
    );
}

#[test]
fn test_render_column_selection() {
    let selections = vec![
        ColumnSelection::new("pedidos", names(&["id", "cliente_id"])),
        ColumnSelection::new("clientes", vec![]),
    ];
    assert_eq!(
        render_column_selection(&selections, "shop"),
        "- shop.pedidos: id, cliente_id\n- shop.clientes: todas as colunas\n"
    );
    assert_eq!(render_column_selection(&[], "shop"), "");
}

/// Parses rendered text back into (table, [(column, pk, fk_target)]).
fn parse_rendered(text: &str) -> Vec<(String, Vec<(String, bool, Option<String>)>)> {
    let mut tables: Vec<(String, Vec<(String, bool, Option<String>)>)> = Vec::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("Tabela: ") {
            let name = rest.split(" (").next().unwrap().to_string();
            tables.push((name, Vec::new()));
        } else if let Some(rest) = line.strip_prefix("- ") {
            let (head, _comment) = rest.split_once(" — ").unwrap();
            let name = head.split(' ').next().unwrap().to_string();
            let annotation = head
                .splitn(3, ") (")
                .nth(1)
                .map(|a| a.trim_end_matches(')').to_string());
            let (pk, fk) = match annotation {
                Some(a) => {
                    let pk = a.split(" / ").any(|p| p == "PK");
                    let fk = a
                        .split(" / ")
                        .find_map(|p| p.strip_prefix("FK → ").map(str::to_string));
                    (pk, fk)
                }
                None => (false, None),
            };
            tables.last_mut().unwrap().1.push((name, pk, fk));
        }
    }
    tables
}

#[test]
fn test_rendered_text_round_trips_names_and_keys() {
    let schema = shop_schema();
    let text = render(&schema, &schema.table_names(), "");

    let parsed = parse_rendered(&text);

    assert_eq!(parsed.len(), schema.len());
    for (table_name, columns) in parsed {
        let table = schema.get(&table_name).expect("table name survives rendering");
        assert_eq!(columns.len(), table.columns.len());
        for ((name, pk, fk), column) in columns.iter().zip(&table.columns) {
            assert_eq!(name, &column.name);
            assert_eq!(*pk, column.is_primary_key);
            assert_eq!(fk.is_some(), column.is_foreign_key);
            assert_eq!(fk, &column.references);
        }
    }
    assert!(text.contains("- nome (text) — Sem comentário"));
}
