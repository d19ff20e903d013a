//! Driver abstraction the catalog operations and tool handlers depend on.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// One result row: column name to JSON value, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A positional statement argument, bound as `$1`, `$2`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Int(i64),
    Text(String),
}

/// Column metadata as reported by `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: String,
    pub column_default: Option<String>,
}

/// A single live database handle.
///
/// Implementations own exactly one connection; there is no pooling and no
/// transaction management.
pub trait Database: Send + Sync {
    /// Run a row-returning statement.
    fn fetch_all(
        &self,
        sql: &str,
        args: &[SqlArg],
    ) -> impl Future<Output = DbResult<Vec<Row>>> + Send;

    /// Run a statement for its side effect and return a status tag
    /// such as `INSERT 0 1`.
    fn execute(&self, sql: &str, args: &[SqlArg])
    -> impl Future<Output = DbResult<String>> + Send;

    /// Release the handle. Later calls fail with `DbError::NotConnected`.
    fn disconnect(&self) -> impl Future<Output = DbResult<()>> + Send;
}
