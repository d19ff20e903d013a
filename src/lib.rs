//! Two small MCP servers: a Supabase/PostgreSQL pass-through and a
//! flat-file sticky-notes store.

pub mod db;
pub mod logging;
pub mod mcp;
pub mod notes;

#[cfg(test)]
mod logging_test;
