//! Database tool implementations
//!
//! Handles the five PostgreSQL pass-through tools. Each call delegates to
//! [`crate::db::catalog`] and wraps the outcome in an [`Envelope`].

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Envelope;
use crate::db::catalog::{self, DEFAULT_ROW_LIMIT};
use crate::db::{ColumnInfo, Database, DbResult, Row};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExecuteQueryParams {
    #[schemars(description = "SQL SELECT statement to run")]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExecuteCommandParams {
    #[schemars(description = "SQL INSERT/UPDATE/DELETE (or DDL) statement to run")]
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TableSchemaParams {
    #[schemars(description = "Name of the table to describe")]
    pub table_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FetchTableDataParams {
    #[schemars(description = "Table to read, optionally schema-qualified (e.g. 'auth.users')")]
    pub table_name: String,
    #[schemars(description = "Maximum number of rows to return (default: 100)")]
    #[serde(default = "default_row_limit")]
    pub limit: i64,
}

fn default_row_limit() -> i64 {
    DEFAULT_ROW_LIMIT
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Serialize)]
pub struct QueryPayload {
    pub row_count: usize,
    pub data: Vec<Row>,
}

#[derive(Debug, Serialize)]
pub struct CommandPayload {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct TableSchemaPayload {
    pub table_name: String,
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Serialize)]
pub struct TablesPayload {
    pub tables: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TableDataPayload {
    pub table_name: String,
    pub row_count: usize,
    pub data: Vec<Row>,
}

fn respond<T: Serialize>(tool: &str, outcome: DbResult<T>) -> Result<CallToolResult, McpError> {
    if let Err(e) = &outcome {
        warn!(tool, error = %e, "tool call failed");
    }
    Envelope::from(outcome).into_tool_result()
}

// =============================================================================
// Database Tools
// =============================================================================

/// PostgreSQL pass-through tools.
///
/// Generic over `D: Database` so handlers can run against any single
/// connection implementation.
pub struct DatabaseTools<D: Database> {
    db: Arc<D>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<D: Database + 'static> DatabaseTools<D> {
    pub fn new(db: Arc<D>) -> Self {
        Self {
            db,
            tool_router: Self::tool_router(),
        }
    }

    /// Get the tool router for this handler
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Execute a SELECT query on the Supabase database.")]
    pub async fn execute_query(
        &self,
        params: Parameters<ExecuteQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(query = %params.0.query, "execute_query");
        let outcome = catalog::run_query(self.db.as_ref(), &params.0.query)
            .await
            .map(|data| QueryPayload {
                row_count: data.len(),
                data,
            });
        respond("execute_query", outcome)
    }

    #[tool(description = "Execute an INSERT/UPDATE/DELETE command on the Supabase database.")]
    pub async fn execute_command(
        &self,
        params: Parameters<ExecuteCommandParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(command = %params.0.command, "execute_command");
        let outcome = catalog::run_command(self.db.as_ref(), &params.0.command)
            .await
            .map(|result| CommandPayload { result });
        respond("execute_command", outcome)
    }

    #[tool(description = "Get schema information (columns, types, nullability, defaults) for a specific table.")]
    pub async fn get_table_schema(
        &self,
        params: Parameters<TableSchemaParams>,
    ) -> Result<CallToolResult, McpError> {
        let table_name = params.0.table_name;
        debug!(table = %table_name, "get_table_schema");
        let columns = catalog::describe_table(self.db.as_ref(), &table_name).await;
        let outcome = columns.map(|columns| TableSchemaPayload {
            table_name,
            columns,
        });
        respond("get_table_schema", outcome)
    }

    #[tool(description = "List all tables in the public schema of the database.")]
    pub async fn list_tables(&self) -> Result<CallToolResult, McpError> {
        debug!("list_tables");
        let outcome = catalog::list_tables(self.db.as_ref())
            .await
            .map(|tables| TablesPayload { tables });
        respond("list_tables", outcome)
    }

    #[tool(description = "Fetch rows from a specific table with an optional limit (default: 100).")]
    pub async fn fetch_table_data(
        &self,
        params: Parameters<FetchTableDataParams>,
    ) -> Result<CallToolResult, McpError> {
        let FetchTableDataParams { table_name, limit } = params.0;
        debug!(table = %table_name, limit, "fetch_table_data");
        let rows = catalog::fetch_rows(self.db.as_ref(), &table_name, limit).await;
        let outcome = rows.map(|data| TableDataPayload {
            table_name,
            row_count: data.len(),
            data,
        });
        respond("fetch_table_data", outcome)
    }
}

#[tool_handler]
impl<D: Database + 'static> ServerHandler for DatabaseTools<D> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Supabase MCP Server - run SQL queries and commands, inspect table schemas, list tables and fetch table rows. Every tool returns {\"success\": ...}."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
