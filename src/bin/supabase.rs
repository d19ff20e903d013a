//! Supabase MCP server binary.
//!
//! Connects once at startup using `SUPABASE_*` environment variables, serves
//! the database tools over stdio, and closes the connection on shutdown.

use std::sync::Arc;

use clap::Parser;
use miette::Result;
use supanotes::db::{ConnectionConfig, Database, DbResult, PgDatabase, catalog};
use supanotes::logging::init_tracing;
use supanotes::mcp::{DatabaseTools, serve_stdio};

#[derive(Parser)]
#[command(name = "supabase-mcp")]
#[command(author, version, about = "MCP server with Supabase PostgreSQL database integration", long_about = None)]
struct Cli {
    /// Connect, list tables, disconnect and exit instead of serving
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("supanotes=info");

    let config = ConnectionConfig::from_env()?;

    if cli.check {
        return check_connection(&config).await;
    }

    let db = Arc::new(PgDatabase::connect(&config).await?);
    let served = serve_stdio(DatabaseTools::new(Arc::clone(&db))).await;

    db.disconnect().await?;
    served?;
    Ok(())
}

/// Connection self-test: report the tables found or the failure.
async fn check_connection(config: &ConnectionConfig) -> Result<()> {
    let outcome: DbResult<Vec<String>> = async {
        let db = PgDatabase::connect(config).await?;
        let tables = catalog::list_tables(&db).await;
        db.disconnect().await?;
        tables
    }
    .await;

    match outcome {
        Ok(tables) => {
            println!("Connected successfully! Found tables: {:?}", tables);
            Ok(())
        }
        Err(e) => {
            println!("Connection failed: {}", e);
            Err(e.into())
        }
    }
}
