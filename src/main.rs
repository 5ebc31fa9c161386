//! Jiminny MCP - stdio MCP server for Jiminny conversations
//!
#![doc = "Main entry point for the jiminny-mcp binary."]

use anyhow::Result;

use jiminny_mcp::api::ApiClient;
use jiminny_mcp::cli::{Cli, Commands};
use jiminny_mcp::config::Config;
use jiminny_mcp::error::{JiminnyError, TOKEN_ENV_VAR};
use jiminny_mcp::logging::init_logging;
use jiminny_mcp::mcp::McpServer;
use jiminny_mcp::tools::{default_registry, ToolRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_logging(cli.verbose, cli.json_logs)?;

    // Load and validate configuration
    let config = Config::load(cli.config_path(), &cli)?;
    config.validate()?;

    if !config.api.has_token() {
        tracing::warn!(
            "{} is not set; every tool call will return the token instructions",
            TOKEN_ENV_VAR
        );
    }

    let client = ApiClient::new(&config.api)?;
    let registry = default_registry(client, config.output.character_limit);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("Starting MCP server ({} tools)", registry.len());
            let server = McpServer::new(&config.server, registry);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            server.serve(stdin, tokio::io::stdout()).await?;
            Ok(())
        }
        Commands::Tools => {
            let definitions = registry.definitions();
            println!("{}", serde_json::to_string_pretty(&definitions)?);
            Ok(())
        }
        Commands::Call { tool, args } => run_call(&registry, &tool, &args).await,
    }
}

/// Invoke one tool and print its text
///
/// Tool failures are printed like successes, since they are already
/// user-facing messages; only an unknown tool or unparsable arguments
/// end the process with an error.
async fn run_call(registry: &ToolRegistry, tool: &str, args: &str) -> Result<()> {
    let args: serde_json::Value = serde_json::from_str(args)
        .map_err(|e| JiminnyError::InvalidInput(format!("--args is not valid JSON: {}", e)))?;

    let result = registry
        .call(tool, args)
        .await
        .ok_or_else(|| JiminnyError::InvalidInput(format!("Unknown tool: {}", tool)))?;

    println!("{}", result.output);
    if !result.success {
        tracing::debug!("Tool {} reported an error", tool);
    }
    Ok(())
}
