//! # Session State Tests

use sqlgen::{ColumnSelection, OutputTarget, Session, SessionError};
use sqlgen_test_utils::shop_schema;

#[test]
fn test_first_question_seeds_selection_from_detection() {
    let schema = shop_schema();
    let mut session = Session::new();

    session.set_question("Quais pedidos cada CLIENTES fez", &schema);

    // Schema order, not question order.
    assert_eq!(session.detected_tables(), ["pedidos", "clientes"]);
    assert_eq!(session.selected_tables(), ["pedidos", "clientes"]);
}

#[test]
fn test_detection_only_happens_once() {
    let schema = shop_schema();
    let mut session = Session::new();
    session.set_question("listar pedidos", &schema);
    session.set_question("listar clientes", &schema);

    assert_eq!(session.question(), "listar clientes");
    assert_eq!(session.detected_tables(), ["pedidos"]);
    assert_eq!(session.selected_tables(), ["pedidos"]);
}

#[test]
fn test_explicit_selection_is_not_overwritten_by_detection() {
    let schema = shop_schema();
    let mut session = Session::new();
    session.set_selection(vec!["clientes".to_string()]);
    session.set_question("listar pedidos", &schema);

    assert_eq!(session.selected_tables(), ["clientes"]);
}

#[test]
fn test_clear_resets_question_and_selections() {
    let schema = shop_schema();
    let mut session = Session::new();
    session.set_namespace("  shop ");
    session.set_question("listar pedidos", &schema);
    session.set_columns("pedidos", vec!["id".to_string()]);

    session.clear();

    assert_eq!(session.question(), "");
    assert!(session.detected_tables().is_empty());
    assert!(session.selected_tables().is_empty());
    assert!(session.column_selections().is_empty());
    assert_eq!(session.namespace(), "shop");

    session.set_question("listar clientes", &schema);
    assert_eq!(session.selected_tables(), ["clientes"]);
}

#[test]
fn test_request_preconditions() {
    let schema = shop_schema();
    let mut session = Session::new();
    assert_eq!(
        session.request(OutputTarget::Sql),
        Err(SessionError::MissingQuestion)
    );

    session.set_question("quantos registros existem", &schema);
    assert_eq!(
        session.request(OutputTarget::Sql),
        Err(SessionError::NoTablesSelected)
    );
    assert_eq!(
        SessionError::NoTablesSelected.to_string(),
        "Selecione ao menos uma tabela."
    );
}

#[test]
fn test_request_carries_column_choices_in_selection_order() {
    let schema = shop_schema();
    let mut session = Session::new();
    session.set_namespace("shop");
    session.set_question("pedidos por clientes", &schema);
    session.set_selection(vec!["pedidos".to_string(), "clientes".to_string()]);
    session.set_columns("pedidos", vec!["id".to_string()]);

    let request = session.request(OutputTarget::SqlAlchemy).unwrap();

    assert_eq!(request.namespace, "shop");
    assert_eq!(request.target, OutputTarget::SqlAlchemy);
    assert_eq!(
        request.columns,
        vec![
            ColumnSelection::new("pedidos", vec!["id".to_string()]),
            ColumnSelection::new("clientes", vec![]),
        ]
    );

    session.set_selection(vec!["clientes".to_string()]);
    session.set_selection(vec!["clientes".to_string(), "pedidos".to_string()]);
    assert_eq!(
        session.column_selections()[1],
        ColumnSelection::new("pedidos", vec![])
    );
}
