//! Command-line interface definition for the Jiminny MCP server
//!
//! This module defines the CLI structure using clap's derive API.
//! Without a subcommand the binary serves MCP over stdio, which is how
//! agent hosts launch it.

use clap::{Parser, Subcommand};

/// Jiminny MCP server
///
/// Exposes Jiminny conversations, transcripts and AI summaries as MCP
/// tools over stdin/stdout.
#[derive(Parser, Debug, Clone)]
#[command(name = "jiminny-mcp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "JIMINNY_MCP_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines (still on stderr)
    #[arg(long)]
    pub json_logs: bool,

    /// Override the Jiminny API base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Command to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout
    Serve,

    /// Print the tool catalogue as JSON
    Tools,

    /// Invoke a single tool and print its output
    Call {
        /// Tool name, e.g. jiminny_list_conversations
        #[arg(short, long)]
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Path of the configuration file to load
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or("config/config.yaml")
    }
}
