//! Stdio transport runner.

use miette::Diagnostic;
use rmcp::{ServerHandler, ServiceExt, transport::stdio};
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
pub enum ServeError {
    #[error("MCP session failed to initialize: {message}")]
    #[diagnostic(code(supanotes::mcp::initialize))]
    Initialize { message: String },

    #[error("MCP service task failed: {0}")]
    #[diagnostic(code(supanotes::mcp::join))]
    Join(#[from] tokio::task::JoinError),
}

/// Serve `handler` over stdin/stdout until the client disconnects.
pub async fn serve_stdio<S: ServerHandler>(handler: S) -> Result<(), ServeError> {
    let running = handler
        .serve(stdio())
        .await
        .map_err(|e| ServeError::Initialize {
            message: e.to_string(),
        })?;
    info!("MCP server ready on stdio");

    let reason = running.waiting().await?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
