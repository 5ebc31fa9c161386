//! MCP (Model Context Protocol) server support
//!
//! # Module Layout
//!
//! - `types`  -- JSON-RPC 2.0 primitives and the MCP types a tool server needs
//! - `server` -- Newline-delimited JSON-RPC server over async byte streams

pub mod server;
pub mod types;

pub use server::McpServer;
