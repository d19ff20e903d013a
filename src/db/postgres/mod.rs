//! PostgreSQL implementation of the [`Database`](crate::db::Database) trait.

mod connection;
mod row;

#[cfg(test)]
mod row_test;

pub use connection::PgDatabase;
pub use row::row_to_json;
