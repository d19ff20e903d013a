//! Single-connection PostgreSQL handle.

use futures_util::TryStreamExt;
use sqlx::postgres::{PgArguments, PgConnection};
use sqlx::query::Query;
use sqlx::{Connection, Postgres};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::row::row_to_json;
use crate::db::command_tag;
use crate::db::{ConnectionConfig, Database, DbError, DbResult, Row, SqlArg};

/// One live connection, held for the lifetime of the process.
///
/// Statements serialise on the mutex; the driver does not multiplex a
/// single connection.
pub struct PgDatabase {
    conn: Mutex<Option<PgConnection>>,
}

impl PgDatabase {
    /// Open the connection described by `config`.
    pub async fn connect(config: &ConnectionConfig) -> DbResult<Self> {
        let options = config.connect_options()?;
        info!(db = %config, "Connecting to database");

        let conn = PgConnection::connect_with(&options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Whether the handle is still open.
    pub async fn is_connected(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

fn bind_args<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    args: &[SqlArg],
) -> Query<'q, Postgres, PgArguments> {
    for arg in args {
        query = match arg {
            SqlArg::Int(value) => query.bind(*value),
            SqlArg::Text(value) => query.bind(value.clone()),
        };
    }
    query
}

/// Run `sql` over the simple-query protocol, so a single call may carry
/// several statements, and return the rows affected by the last one.
async fn last_rows_affected(conn: &mut PgConnection, sql: &str) -> Result<u64, sqlx::Error> {
    let mut results = sqlx::raw_sql(sql).execute_many(&mut *conn);
    let mut rows_affected = 0;
    while let Some(result) = results.try_next().await? {
        rows_affected = result.rows_affected();
    }
    Ok(rows_affected)
}

impl Database for PgDatabase {
    async fn fetch_all(&self, sql: &str, args: &[SqlArg]) -> DbResult<Vec<Row>> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(DbError::NotConnected)?;

        debug!(sql, args = args.len(), "fetch_all");
        let rows = bind_args(sqlx::query(sql), args)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| DbError::Query {
                message: e.to_string(),
            })?;

        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn execute(&self, sql: &str, args: &[SqlArg]) -> DbResult<String> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(DbError::NotConnected)?;

        debug!(sql, args = args.len(), "execute");
        let rows_affected = (if args.is_empty() {
            last_rows_affected(&mut *conn, sql).await
        } else {
            bind_args(sqlx::query(sql), args)
                .execute(&mut *conn)
                .await
                .map(|result| result.rows_affected())
        })
        .map_err(|e| DbError::Command {
            message: e.to_string(),
        })?;

        Ok(command_tag(sql, rows_affected))
    }

    async fn disconnect(&self) -> DbResult<()> {
        if let Some(conn) = self.conn.lock().await.take() {
            conn.close().await.map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
            info!("Database connection closed");
        }
        Ok(())
    }
}
