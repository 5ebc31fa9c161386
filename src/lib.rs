//! Jiminny MCP - conversation intelligence tools for agent hosts
//!
//! This library exposes the Jiminny sales-call platform as three MCP tools:
//! list recorded conversations, fetch a transcript, and assemble an
//! AI-generated summary report. Every tool returns markdown text, and
//! every failure is turned into a readable message instead of an error.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Authenticated HTTP client for the Jiminny REST API
//! - `extract`: Schema-agnostic probing of loosely-shaped JSON responses
//! - `format`: Markdown rendering and output truncation
//! - `tools`: The three tools and the registry the server dispatches to
//! - `mcp`: JSON-RPC / MCP wire types and the stdio server
//! - `config`: Configuration management and validation
//! - `error`: Error types, result alias and user-facing error messages
//! - `cli`: Command-line interface definition
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```no_run
//! use jiminny_mcp::{api::ApiClient, tools::default_registry, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let client = ApiClient::new(&config.api)?;
//!     let registry = default_registry(client, config.output.character_limit);
//!     if let Some(result) = registry
//!         .call("jiminny_list_conversations", serde_json::json!({"page": 1}))
//!         .await
//!     {
//!         println!("{}", result.output);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod logging;
pub mod mcp;
pub mod tools;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{describe_error, JiminnyError, Result};
pub use mcp::McpServer;
pub use tools::{default_registry, ToolRegistry, ToolResult};
