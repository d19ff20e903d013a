//! Note tool implementations
//!
//! Exposes the note store as four tools, the `notes://latest` resource and
//! the `note_summary_prompt` prompt. File errors surface as MCP internal
//! errors rather than envelopes.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::text_result;
use crate::notes::{NoteError, NoteResult, NoteStore};

pub const LATEST_NOTES_URI: &str = "notes://latest";
pub const SUMMARY_PROMPT_NAME: &str = "note_summary_prompt";

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddNoteParams {
    #[schemars(description = "The note text to append")]
    pub note: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteNoteParams {
    #[schemars(description = "Exact note text to delete (surrounding whitespace ignored). Every matching line is removed.")]
    pub note: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ModifyNoteParams {
    #[schemars(description = "Exact text of the note to change (surrounding whitespace ignored)")]
    pub old_note: String,
    #[schemars(description = "Replacement text. Every matching line is replaced.")]
    pub new_note: String,
}

fn map_note_error(e: NoteError) -> McpError {
    McpError::internal_error(e.to_string(), None)
}

/// Sticky-note tools over a single flat file.
pub struct NoteTools {
    store: Arc<NoteStore>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NoteTools {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    /// Get the tool router for this handler
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    /// Run a store operation on the blocking pool.
    async fn with_store<T, F>(&self, op: F) -> Result<T, McpError>
    where
        T: Send + 'static,
        F: FnOnce(&NoteStore) -> NoteResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?
            .map_err(map_note_error)
    }

    #[tool(description = "Add a note to the notes file.")]
    pub async fn add_note(
        &self,
        params: Parameters<AddNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("add_note");
        let AddNoteParams { note } = params.0;
        let message = self.with_store(move |store| store.add(&note)).await?;
        Ok(text_result(message))
    }

    #[tool(description = "Delete every note whose text matches exactly.")]
    pub async fn delete_note(
        &self,
        params: Parameters<DeleteNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("delete_note");
        let DeleteNoteParams { note } = params.0;
        let message = self.with_store(move |store| store.delete(&note)).await?;
        Ok(text_result(message))
    }

    #[tool(description = "Replace every note whose text matches old_note with new_note.")]
    pub async fn modify_note(
        &self,
        params: Parameters<ModifyNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("modify_note");
        let ModifyNoteParams { old_note, new_note } = params.0;
        let message = self
            .with_store(move |store| store.modify(&old_note, &new_note))
            .await?;
        Ok(text_result(message))
    }

    #[tool(description = "Read all notes from the notes file.")]
    pub async fn read_notes(&self) -> Result<CallToolResult, McpError> {
        debug!("read_notes");
        let content = self.with_store(NoteStore::read_all).await?;
        Ok(text_result(content))
    }
}

// Resource and prompt bodies, shared by the ServerHandler methods and tests.
impl NoteTools {
    pub async fn latest_notes(&self) -> Result<ReadResourceResult, McpError> {
        let text = self.with_store(NoteStore::latest_view).await?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, LATEST_NOTES_URI)],
        })
    }

    pub async fn summary_prompt(&self) -> Result<GetPromptResult, McpError> {
        let text = self.with_store(NoteStore::summary_prompt).await?;
        Ok(GetPromptResult {
            description: Some("Summarize the current notes".to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }

    fn latest_notes_resource() -> Resource {
        RawResource {
            description: Some("The current contents of the notes file".to_string()),
            mime_type: Some("text/plain".to_string()),
            ..RawResource::new(LATEST_NOTES_URI, "latest_notes".to_string())
        }
        .no_annotation()
    }
}

#[tool_handler]
impl ServerHandler for NoteTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            instructions: Some(
                "AI Sticky Notes - add, delete, modify and read notes stored one per line in a text file."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(vec![
            Self::latest_notes_resource(),
        ]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match request.uri.as_str() {
            LATEST_NOTES_URI => self.latest_notes().await,
            _ => Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": request.uri })),
            )),
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(vec![Prompt::new(
            SUMMARY_PROMPT_NAME,
            Some("Summarize the current notes"),
            None,
        )]))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        if request.name == SUMMARY_PROMPT_NAME {
            self.summary_prompt().await
        } else {
            Err(McpError::invalid_params(
                format!("Unknown prompt: {}", request.name),
                None,
            ))
        }
    }
}
