//! The five database operations exposed as tools.
//!
//! Each function is a thin wrapper over a [`Database`] call; the catalog
//! lookups read `information_schema`.

use crate::db::helpers::validate_identifier;
use crate::db::{ColumnInfo, Database, DbError, DbResult, Row, SqlArg};

/// Row limit applied by [`fetch_rows`] when the caller gives none.
pub const DEFAULT_ROW_LIMIT: i64 = 100;

const TABLE_SCHEMA_SQL: &str = r#"
SELECT column_name::text AS column_name,
       data_type::text AS data_type,
       is_nullable::text AS is_nullable,
       column_default::text AS column_default
FROM information_schema.columns
WHERE table_name = $1
ORDER BY ordinal_position
"#;

const LIST_TABLES_SQL: &str = r#"
SELECT table_name::text AS table_name
FROM information_schema.tables
WHERE table_schema = 'public'
  AND table_type = 'BASE TABLE'
ORDER BY table_name
"#;

/// Run a row-returning statement. The text is not checked for being
/// read-only.
pub async fn run_query<D: Database>(db: &D, sql: &str) -> DbResult<Vec<Row>> {
    db.fetch_all(sql, &[]).await
}

/// Run a data-modifying statement and return the driver status tag.
pub async fn run_command<D: Database>(db: &D, sql: &str) -> DbResult<String> {
    db.execute(sql, &[]).await
}

/// Column metadata for `table_name`. Unknown tables yield an empty list.
pub async fn describe_table<D: Database>(db: &D, table_name: &str) -> DbResult<Vec<ColumnInfo>> {
    let rows = db
        .fetch_all(TABLE_SCHEMA_SQL, &[SqlArg::Text(table_name.to_string())])
        .await?;

    rows.into_iter()
        .map(|row| {
            serde_json::from_value(serde_json::Value::Object(row)).map_err(|e| DbError::Query {
                message: format!("Unexpected column metadata row: {e}"),
            })
        })
        .collect()
}

/// Names of all base tables in the `public` schema, ascending.
pub async fn list_tables<D: Database>(db: &D) -> DbResult<Vec<String>> {
    let rows = db.fetch_all(LIST_TABLES_SQL, &[]).await?;

    Ok(rows
        .into_iter()
        .filter_map(|mut row| match row.remove("table_name") {
            Some(serde_json::Value::String(name)) => Some(name),
            _ => None,
        })
        .collect())
}

/// Up to `limit` rows of `table_name`.
///
/// The table name is validated before it is spliced into the statement; the
/// limit is always a bound parameter.
pub async fn fetch_rows<D: Database>(db: &D, table_name: &str, limit: i64) -> DbResult<Vec<Row>> {
    let table = validate_identifier(table_name)?;
    let sql = format!("SELECT * FROM {table} LIMIT $1");
    db.fetch_all(&sql, &[SqlArg::Int(limit)]).await
}
