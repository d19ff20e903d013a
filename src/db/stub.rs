//! In-memory `Database` used by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use crate::db::{Database, DbError, DbResult, Row, SqlArg};

/// A statement the stub received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

/// Records every statement and answers with canned data.
pub struct StubDatabase {
    rows: Vec<Row>,
    status: String,
    failure: Option<String>,
    connected: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl StubDatabase {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            status: "OK".to_string(),
            failure: None,
            connected: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// Make every statement fail with the given driver message.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, sql: &str, args: &[SqlArg]) -> DbResult<()> {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            args: args.to_vec(),
        });
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DbError::NotConnected)
        }
    }
}

/// Build a row from `(column, value)` pairs.
pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

impl Database for StubDatabase {
    async fn fetch_all(&self, sql: &str, args: &[SqlArg]) -> DbResult<Vec<Row>> {
        self.record(sql, args)?;
        match &self.failure {
            Some(message) => Err(DbError::Query {
                message: message.clone(),
            }),
            None => Ok(self.rows.clone()),
        }
    }

    async fn execute(&self, sql: &str, args: &[SqlArg]) -> DbResult<String> {
        self.record(sql, args)?;
        match &self.failure {
            Some(message) => Err(DbError::Command {
                message: message.clone(),
            }),
            None => Ok(self.status.clone()),
        }
    }

    async fn disconnect(&self) -> DbResult<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}
