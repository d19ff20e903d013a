//! Database error types.
//!
//! Every variant renders the message that ends up in the `error` field of a
//! failure envelope, so the wording is part of the tool contract.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Invalid database configuration: {message}")]
    #[diagnostic(
        code(supanotes::db::configuration),
        help("Set SUPABASE_DB_URL, or SUPABASE_HOST/PORT/DATABASE/USER/PASSWORD")
    )]
    Configuration { message: String },

    #[error("Failed to connect to Supabase database: {message}")]
    #[diagnostic(code(supanotes::db::connection))]
    Connection { message: String },

    #[error("Database not connected")]
    #[diagnostic(code(supanotes::db::not_connected))]
    NotConnected,

    #[error("Query execution failed: {message}")]
    #[diagnostic(code(supanotes::db::query))]
    Query { message: String },

    #[error("Command execution failed: {message}")]
    #[diagnostic(code(supanotes::db::command))]
    Command { message: String },

    #[error("Invalid table identifier: '{identifier}'")]
    #[diagnostic(
        code(supanotes::db::invalid_identifier),
        help("Use a plain or schema-qualified name made of letters, digits, '_' and '$'")
    )]
    InvalidIdentifier { identifier: String },
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
