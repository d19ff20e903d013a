//! PostgreSQL pass-through layer.
//!
//! # Architecture
//!
//! - `error`: error taxonomy shared by every operation
//! - `config`: connection settings resolved from `SUPABASE_*` variables
//! - `repository`: the `Database` trait the tool handlers are generic over
//! - `statement`: command tags rebuilt from statement text
//! - `catalog`: the query, command and catalog lookups exposed as tools
//! - `postgres`: the single-connection sqlx implementation

pub mod catalog;
mod config;
mod error;
mod helpers;
pub mod postgres;
mod repository;
mod statement;

#[cfg(test)]
pub(crate) mod stub;

#[cfg(test)]
mod catalog_test;

pub use config::ConnectionConfig;
pub use error::{DbError, DbResult};
pub use helpers::validate_identifier;
pub use postgres::PgDatabase;
pub use repository::{ColumnInfo, Database, Row, SqlArg};
pub use statement::command_tag;
