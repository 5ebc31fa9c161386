//! Error types for the Jiminny MCP server
//!
//! This module defines the error enum used throughout the crate, built
//! with `thiserror`, and the mapping from any error to the user-facing
//! text that tool calls return in place of a failure.

use thiserror::Error;

/// Environment variable holding the Jiminny bearer token.
pub const TOKEN_ENV_VAR: &str = "JIMINNY_TOKEN";

/// Main error type for Jiminny MCP operations
#[derive(Error, Debug)]
pub enum JiminnyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No bearer token was configured
    #[error(
        "JIMINNY_TOKEN environment variable is not set. \
         Get your token from Jiminny browser DevTools: \
         Network tab > any API request > Authorization header (copy the value after 'Bearer ')."
    )]
    MissingToken,

    /// The upstream API answered with a non-success status
    #[error("Jiminny API returned status {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// The upstream API did not answer within the configured timeout
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// Tool arguments failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl JiminnyError {
    /// Short name of the error kind, used in generic fallback messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigError",
            Self::MissingToken => "MissingToken",
            Self::Status { .. } => "HTTPStatusError",
            Self::Timeout(_) => "TimeoutError",
            Self::InvalidInput(_) => "InvalidInput",
            Self::Io(_) => "IoError",
            Self::Serialization(_) => "JSONDecodeError",
            Self::Yaml(_) => "YamlError",
            Self::Http(_) => "HTTPError",
        }
    }

    /// Render this error as the text a tool call returns
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingToken => self.to_string(),
            Self::Status { status, .. } => status_message(*status),
            Self::Timeout(_) => timeout_message(),
            Self::Http(e) if e.is_timeout() => timeout_message(),
            Self::Http(e) => match e.status() {
                Some(status) => status_message(status.as_u16()),
                None => format!("Error: {}: {}", self.kind(), e),
            },
            Self::InvalidInput(msg) => format!("Error: Invalid input: {}", msg),
            _ => format!("Error: {}: {}", self.kind(), self),
        }
    }
}

/// Fixed message for an upstream status code
pub fn status_message(status: u16) -> String {
    match status {
        401 => "Error: Authentication failed (401). Your token may have expired. \
                Go to Jiminny in your browser, open DevTools > Network tab, \
                refresh the page, and copy the new Bearer token."
            .to_string(),
        403 => "Error: Permission denied (403). You don't have access to this resource."
            .to_string(),
        404 => "Error: Not found (404). Check that the conversation ID is correct.".to_string(),
        429 => "Error: Rate limit exceeded (429). Wait a moment and try again.".to_string(),
        other => format!("Error: Jiminny API returned status {}.", other),
    }
}

fn timeout_message() -> String {
    "Error: Request timed out. Try again.".to_string()
}

/// Convert any error into the message returned to the MCP host
///
/// Errors raised by this crate are mapped through
/// [`JiminnyError::user_message`]; bare `reqwest` errors get the same
/// treatment; anything else falls back to a generic message.
pub fn describe_error(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<JiminnyError>() {
        return e.user_message();
    }
    if let Some(e) = err.downcast_ref::<reqwest::Error>() {
        if e.is_timeout() {
            return timeout_message();
        }
        if let Some(status) = e.status() {
            return status_message(status.as_u16());
        }
        return format!("Error: HTTPError: {}", e);
    }
    if let Some(e) = err.downcast_ref::<serde_json::Error>() {
        return format!("Error: JSONDecodeError: {}", e);
    }
    format!("Error: UnexpectedError: {}", err)
}

/// Result type alias for Jiminny MCP operations
///
/// Uses `anyhow::Error` so context can be attached while the concrete
/// [`JiminnyError`] stays recoverable through downcasting.
pub type Result<T> = anyhow::Result<T>;
