//! Tools module for the Jiminny MCP server
//!
//! This module contains the tool executor trait, the tool registry that
//! the MCP server dispatches to, and the three Jiminny tools.

pub mod get_summary;
pub mod get_transcript;
pub mod list_conversations;

use crate::api::ApiClient;
use crate::error::{describe_error, JiminnyError, Result};
use crate::mcp::types::McpTool;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub use get_summary::GetSummaryTool;
pub use get_transcript::GetTranscriptTool;
pub use list_conversations::ListConversationsTool;

/// Tool result structure
///
/// Every call yields text: either the rendered document or a human-readable
/// error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Whether the tool execution succeeded
    pub success: bool,
    /// Rendered output, or the error message on failure
    pub output: String,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: String) -> Self {
        Self {
            success: true,
            output,
        }
    }

    /// Create a failed tool result
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            output: message,
        }
    }
}

/// Tool executor trait for implementing tool execution logic
///
/// # Examples
///
/// ```
/// use jiminny_mcp::error::Result;
/// use jiminny_mcp::mcp::types::McpTool;
/// use jiminny_mcp::tools::ToolExecutor;
/// use async_trait::async_trait;
/// use serde_json::Value;
///
/// struct Echo;
///
/// #[async_trait]
/// impl ToolExecutor for Echo {
///     fn definition(&self) -> McpTool {
///         McpTool {
///             name: "echo".to_string(),
///             title: None,
///             description: Some("Echo the arguments".to_string()),
///             input_schema: serde_json::json!({"type": "object"}),
///             annotations: None,
///         }
///     }
///
///     async fn execute(&self, args: Value) -> Result<String> {
///         Ok(args.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Returns the tool definition advertised through `tools/list`
    fn definition(&self) -> McpTool;

    /// Executes the tool with the given arguments
    ///
    /// # Errors
    ///
    /// Returns error if the arguments are invalid or the upstream call
    /// fails; the registry turns it into a text result
    async fn execute(&self, args: Value) -> Result<String>;
}

/// Tool registry keyed by tool name
///
/// Ordered so `tools/list` is stable across runs.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn ToolExecutor>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool executor under the name from its definition
    pub fn register(&mut self, executor: Arc<dyn ToolExecutor>) {
        let name = executor.definition().name;
        self.tools.insert(name, executor);
    }

    /// Get a tool executor by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolExecutor>> {
        self.tools.get(name).cloned()
    }

    /// All tool definitions in name order
    pub fn definitions(&self) -> Vec<McpTool> {
        self.tools
            .values()
            .map(|executor| executor.definition())
            .collect()
    }

    /// Invoke a tool by name
    ///
    /// Returns `None` for an unknown tool. Any error raised by the tool is
    /// converted to its user-facing message, so a call never fails.
    pub async fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let executor = self.get(name)?;
        tracing::info!("Calling tool {}", name);

        let result = match executor.execute(args).await {
            Ok(output) => ToolResult::success(output),
            Err(e) => {
                tracing::warn!("Tool {} failed: {:#}", name, e);
                ToolResult::error(describe_error(&e))
            }
        };
        Some(result)
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Build the registry holding the three Jiminny tools
///
/// # Arguments
///
/// * `client` - API client shared by every tool
/// * `character_limit` - Maximum characters of any returned document
pub fn default_registry(client: ApiClient, character_limit: usize) -> ToolRegistry {
    let client = Arc::new(client);
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ListConversationsTool::new(
        Arc::clone(&client),
        character_limit,
    )));
    registry.register(Arc::new(GetTranscriptTool::new(
        Arc::clone(&client),
        character_limit,
    )));
    registry.register(Arc::new(GetSummaryTool::new(client, character_limit)));
    registry
}

/// Deserialize tool arguments, treating absent arguments as `{}`
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| JiminnyError::InvalidInput(e.to_string()).into())
}

/// Arguments shared by the per-conversation tools
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConversationIdArgs {
    conversation_id: String,
}

impl ConversationIdArgs {
    /// Trimmed conversation id
    ///
    /// # Errors
    ///
    /// Returns [`JiminnyError::InvalidInput`] if the id is blank
    pub(crate) fn into_id(self) -> Result<String> {
        let id = self.conversation_id.trim();
        if id.is_empty() {
            return Err(
                JiminnyError::InvalidInput("conversation_id must not be empty".to_string()).into(),
            );
        }
        Ok(id.to_string())
    }
}

/// Input schema for the per-conversation tools
pub(crate) fn conversation_id_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "conversation_id": {
                "type": "string",
                "minLength": 1,
                "description": "The Jiminny conversation UUID (e.g. 'ad0a10bc-90ce-44f3-baa4-2c7ce6d7104c'). Get IDs from jiminny_list_conversations."
            }
        },
        "required": ["conversation_id"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct MockToolExecutor {
        name: String,
        fail: bool,
    }

    #[async_trait]
    impl ToolExecutor for MockToolExecutor {
        fn definition(&self) -> McpTool {
            McpTool {
                name: self.name.clone(),
                title: None,
                description: Some("Mock tool".to_string()),
                input_schema: serde_json::json!({"type": "object"}),
                annotations: None,
            }
        }

        async fn execute(&self, _args: Value) -> Result<String> {
            if self.fail {
                Err(JiminnyError::Status {
                    status: 404,
                    url: "http://localhost/x".to_string(),
                }
                .into())
            } else {
                Ok("mock output".to_string())
            }
        }
    }

    fn mock(name: &str, fail: bool) -> Arc<dyn ToolExecutor> {
        Arc::new(MockToolExecutor {
            name: name.to_string(),
            fail,
        })
    }

    #[test]
    fn test_tool_registry_new() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_tool_registry_definitions_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(mock("b", false));
        registry.register(mock("a", false));
        let names: Vec<String> = registry.definitions().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_call_success() {
        let mut registry = ToolRegistry::new();
        registry.register(mock("ok", false));
        let result = registry.call("ok", Value::Null).await.unwrap();
        assert_eq!(result, ToolResult::success("mock output".to_string()));
    }

    #[tokio::test]
    async fn test_call_error_becomes_text() {
        let mut registry = ToolRegistry::new();
        registry.register(mock("bad", true));
        let result = registry.call("bad", Value::Null).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("Not found (404)"));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::new();
        assert!(registry.call("missing", Value::Null).await.is_none());
    }

    #[test]
    fn test_default_registry_has_three_tools() {
        let client =
            ApiClient::with_timeout("http://localhost", None, Duration::from_secs(1)).unwrap();
        let registry = default_registry(client, 25_000);
        let names: Vec<String> = registry.definitions().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "jiminny_get_summary",
                "jiminny_get_transcript",
                "jiminny_list_conversations"
            ]
        );
        for tool in registry.definitions() {
            let hints = tool.annotations.unwrap();
            assert_eq!(hints.read_only_hint, Some(true));
            assert_eq!(hints.destructive_hint, Some(false));
        }
    }

    #[test]
    fn test_conversation_id_trimmed() {
        let args: ConversationIdArgs =
            parse_args(serde_json::json!({"conversation_id": "  abc  "})).unwrap();
        assert_eq!(args.into_id().unwrap(), "abc");
    }

    #[test]
    fn test_conversation_id_blank_rejected() {
        let args: ConversationIdArgs =
            parse_args(serde_json::json!({"conversation_id": "   "})).unwrap();
        let err = args.into_id().unwrap_err();
        assert!(describe_error(&err).contains("conversation_id must not be empty"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = parse_args::<ConversationIdArgs>(
            serde_json::json!({"conversation_id": "a", "extra": 1}),
        )
        .unwrap_err();
        assert!(describe_error(&err).starts_with("Error: Invalid input:"));
    }

    #[test]
    fn test_missing_args_rejected() {
        assert!(parse_args::<ConversationIdArgs>(Value::Null).is_err());
    }
}
