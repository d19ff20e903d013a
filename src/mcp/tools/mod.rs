//! MCP tool implementations
//!
//! - `DatabaseTools`: the PostgreSQL pass-through tools
//! - `NoteTools`: the sticky-notes tools, resource and prompt
//!
//! Database tools never fail at the protocol level: every outcome is wrapped
//! in an [`Envelope`] and returned as JSON text.

mod database;
mod notes;

#[cfg(test)]
mod envelope_test;

pub use database::{
    DatabaseTools, ExecuteCommandParams, ExecuteQueryParams, FetchTableDataParams,
    TableSchemaParams,
};
pub use notes::{
    AddNoteParams, DeleteNoteParams, LATEST_NOTES_URI, ModifyNoteParams, NoteTools,
    SUMMARY_PROMPT_NAME,
};

use std::fmt::Display;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Uniform result wrapper: `{"success": true, ...payload}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Success {
        success: bool,
        #[serde(flatten)]
        payload: T,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl<T: Serialize> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Self::Success {
            success: true,
            payload,
        }
    }

    pub fn failure(error: impl Display) -> Self {
        Self::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Serialize into the tool result handed back to the client.
    pub fn into_tool_result(self) -> Result<CallToolResult, McpError> {
        let content = serde_json::to_string_pretty(&self).map_err(|e| {
            McpError::internal_error(
                "serialization_error",
                Some(serde_json::json!({"error": e.to_string()})),
            )
        })?;

        Ok(CallToolResult::success(vec![Content::text(content)]))
    }
}

impl<T: Serialize, E: Display> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::failure(e),
        }
    }
}

/// Plain-text tool result used by the note tools.
pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}
