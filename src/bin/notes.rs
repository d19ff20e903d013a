//! AI Sticky Notes MCP server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use miette::Result;
use supanotes::logging::init_tracing;
use supanotes::mcp::{NoteTools, serve_stdio};
use supanotes::notes::{DEFAULT_NOTES_FILE, NoteStore};
use tracing::info;

#[derive(Parser)]
#[command(name = "sticky-notes")]
#[command(author, version, about = "AI Sticky Notes MCP server", long_about = None)]
struct Cli {
    /// Notes file, one note per line (created if missing)
    #[arg(long, env = "NOTES_FILE", default_value = DEFAULT_NOTES_FILE)]
    notes_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("supanotes=info");

    let store = NoteStore::new(cli.notes_file);
    store.ensure_file()?;
    info!(path = %store.path().display(), "Using notes file");

    serve_stdio(NoteTools::new(Arc::new(store))).await?;
    Ok(())
}
