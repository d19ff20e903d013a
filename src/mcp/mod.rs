//! Model Context Protocol (MCP) servers
//!
//! Both servers speak MCP over stdio through rmcp.
//!
//! - **server**: transport runner shared by both binaries
//! - **tools**: one handler struct per server
//!   - DatabaseTools: PostgreSQL pass-through, generic over `D: Database`
//!   - NoteTools: flat-file sticky notes, plus a resource and a prompt

pub mod server;
pub mod tools;

pub use server::{ServeError, serve_stdio};
pub use tools::{DatabaseTools, Envelope, NoteTools};
