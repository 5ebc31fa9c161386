//! Configuration management for the Jiminny MCP server
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from an optional YAML file, environment variables,
//! and CLI overrides.

use crate::error::{JiminnyError, Result, TOKEN_ENV_VAR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default Jiminny API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://app.jiminny.com/api/v1";

/// Default character budget for every returned document
pub const DEFAULT_CHARACTER_LIMIT: usize = 25_000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Output shaping settings
    #[serde(default)]
    pub output: OutputConfig,
    /// MCP server identity
    #[serde(default)]
    pub server: ServerConfig,
}

/// Upstream Jiminny API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token; usually supplied through `JIMINNY_TOKEN`
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Timeout applied to every request (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User-Agent header sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("jiminny-mcp/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Whether a non-blank token is configured
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Output shaping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Maximum characters in a tool response before truncation
    #[serde(default = "default_character_limit")]
    pub character_limit: usize,
}

fn default_character_limit() -> usize {
    DEFAULT_CHARACTER_LIMIT
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            character_limit: default_character_limit(),
        }
    }
}

/// MCP server identity advertised during `initialize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name reported in `serverInfo`
    #[serde(default = "default_server_name")]
    pub name: String,

    /// Optional instructions handed to the client
    #[serde(default)]
    pub instructions: Option<String>,
}

fn default_server_name() -> String {
    "jiminny_mcp".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            instructions: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| JiminnyError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| JiminnyError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                self.api.token = Some(token.trim().to_string());
            }
        }

        if let Ok(base_url) = std::env::var("JIMINNY_API_BASE_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("JIMINNY_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid JIMINNY_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(limit) = std::env::var("JIMINNY_CHARACTER_LIMIT") {
            if let Ok(value) = limit.parse() {
                self.output.character_limit = value;
            } else {
                tracing::warn!("Invalid JIMINNY_CHARACTER_LIMIT: {}", limit);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.api_base_url {
            self.api.base_url = base_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// A missing token is deliberately not checked here: it is reported
    /// when a tool is called.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url).map_err(|e| {
            JiminnyError::Config(format!("Invalid api.base_url {}: {}", self.api.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(JiminnyError::Config(format!(
                "api.base_url must use http or https, got {}",
                base.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(JiminnyError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.output.character_limit == 0 {
            return Err(JiminnyError::Config(
                "output.character_limit must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
