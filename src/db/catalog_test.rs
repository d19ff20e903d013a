//! Tests for the catalog operations against the stub database.

use serde_json::{Value, json};

use crate::db::catalog::{
    DEFAULT_ROW_LIMIT, describe_table, fetch_rows, list_tables, run_command, run_query,
};
use crate::db::stub::{StubDatabase, row};
use crate::db::{ColumnInfo, Database, DbError, SqlArg};

#[tokio::test]
async fn run_query_passes_sql_through_without_args() {
    let db = StubDatabase::new().with_rows(vec![row(&[("id", json!(1))])]);

    let rows = run_query(&db, "SELECT id FROM notes").await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!(1));
    let calls = db.calls();
    assert_eq!(calls[0].sql, "SELECT id FROM notes");
    assert!(calls[0].args.is_empty());
}

#[tokio::test]
async fn run_query_does_not_check_for_read_only() {
    let db = StubDatabase::new();
    run_query(&db, "DELETE FROM notes RETURNING id").await.unwrap();
    assert_eq!(db.calls()[0].sql, "DELETE FROM notes RETURNING id");
}

#[tokio::test]
async fn run_command_returns_status_tag() {
    let db = StubDatabase::new().with_status("UPDATE 2");
    let status = run_command(&db, "UPDATE notes SET done = true").await.unwrap();
    assert_eq!(status, "UPDATE 2");
}

#[tokio::test]
async fn describe_table_binds_name_and_maps_columns() {
    let db = StubDatabase::new().with_rows(vec![
        row(&[
            ("column_name", json!("id")),
            ("data_type", json!("integer")),
            ("is_nullable", json!("NO")),
            ("column_default", json!("nextval('users_id_seq'::regclass)")),
        ]),
        row(&[
            ("column_name", json!("email")),
            ("data_type", json!("text")),
            ("is_nullable", json!("YES")),
            ("column_default", Value::Null),
        ]),
    ]);

    let columns = describe_table(&db, "users").await.unwrap();

    assert_eq!(
        columns,
        vec![
            ColumnInfo {
                column_name: "id".to_string(),
                data_type: "integer".to_string(),
                is_nullable: "NO".to_string(),
                column_default: Some("nextval('users_id_seq'::regclass)".to_string()),
            },
            ColumnInfo {
                column_name: "email".to_string(),
                data_type: "text".to_string(),
                is_nullable: "YES".to_string(),
                column_default: None,
            },
        ]
    );

    let calls = db.calls();
    assert!(calls[0].sql.contains("information_schema.columns"));
    assert!(calls[0].sql.contains("ORDER BY ordinal_position"));
    assert_eq!(calls[0].args, vec![SqlArg::Text("users".to_string())]);
}

#[tokio::test]
async fn describe_missing_table_is_empty_not_an_error() {
    let db = StubDatabase::new();
    let columns = describe_table(&db, "does_not_exist").await.unwrap();
    assert!(columns.is_empty());
}

#[tokio::test]
async fn list_tables_reads_public_base_tables_in_order() {
    let db = StubDatabase::new().with_rows(vec![
        row(&[("table_name", json!("accounts"))]),
        row(&[("table_name", json!("notes"))]),
        row(&[("table_name", json!("users"))]),
    ]);

    let tables = list_tables(&db).await.unwrap();

    assert_eq!(tables, vec!["accounts", "notes", "users"]);
    let sql = &db.calls()[0].sql;
    assert!(sql.contains("table_schema = 'public'"));
    assert!(sql.contains("table_type = 'BASE TABLE'"));
    assert!(sql.contains("ORDER BY table_name"));
}

#[tokio::test]
async fn fetch_rows_binds_the_limit() {
    let db = StubDatabase::new();

    let rows = fetch_rows(&db, "users", DEFAULT_ROW_LIMIT).await.unwrap();

    assert!(rows.is_empty());
    let calls = db.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].sql, "SELECT * FROM users LIMIT $1");
    assert_eq!(calls[0].args, vec![SqlArg::Int(100)]);
}

#[tokio::test]
async fn fetch_rows_accepts_schema_qualified_names() {
    let db = StubDatabase::new();
    fetch_rows(&db, "auth.users", 5).await.unwrap();
    assert_eq!(db.calls()[0].sql, "SELECT * FROM auth.users LIMIT $1");
    assert_eq!(db.calls()[0].args, vec![SqlArg::Int(5)]);
}

#[tokio::test]
async fn fetch_rows_rejects_bad_identifiers_before_touching_the_database() {
    let db = StubDatabase::new();

    let result = fetch_rows(&db, "users; DROP TABLE users", 10).await;

    assert!(matches!(result, Err(DbError::InvalidIdentifier { .. })));
    assert!(db.calls().is_empty());
}

#[tokio::test]
async fn driver_failures_propagate() {
    let db = StubDatabase::new().failing("relation \"nope\" does not exist");
    let err = run_query(&db, "SELECT * FROM nope").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Query execution failed: relation \"nope\" does not exist"
    );
}

#[tokio::test]
async fn operations_after_disconnect_fail() {
    let db = StubDatabase::new();
    db.disconnect().await.unwrap();
    let result = list_tables(&db).await;
    assert!(matches!(result, Err(DbError::NotConnected)));
}
