//! `jiminny_list_conversations` tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{parse_args, ToolExecutor};
use crate::api::ApiClient;
use crate::error::{JiminnyError, Result};
use crate::format::format_conversation_list;
use crate::mcp::types::{McpTool, ToolAnnotations};

/// Tool name as advertised to the host
pub const NAME: &str = "jiminny_list_conversations";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListConversationsArgs {
    #[serde(default = "default_page")]
    page: i64,
}

fn default_page() -> i64 {
    1
}

/// Lists recorded conversations, newest first, one page at a time
#[derive(Debug, Clone)]
pub struct ListConversationsTool {
    client: Arc<ApiClient>,
    character_limit: usize,
}

impl ListConversationsTool {
    /// Create the tool around a shared API client
    pub fn new(client: Arc<ApiClient>, character_limit: usize) -> Self {
        Self {
            client,
            character_limit,
        }
    }
}

#[async_trait]
impl ToolExecutor for ListConversationsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: NAME.to_string(),
            title: Some("List Jiminny Conversations".to_string()),
            description: Some(
                "List recorded sales conversations from Jiminny, newest first. \
                 Returns a paginated list with title, date, duration, host, contact and \
                 conversation ID. Use the ID to fetch transcripts or summaries with the \
                 other tools."
                    .to_string(),
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "page": {
                        "type": "integer",
                        "minimum": 1,
                        "default": 1,
                        "description": "Page number to retrieve (default: 1). Each page has ~25 conversations."
                    }
                },
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations::read_only("List Jiminny Conversations")),
        }
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: ListConversationsArgs = parse_args(args)?;
        if args.page < 1 {
            return Err(JiminnyError::InvalidInput(format!(
                "page must be at least 1, got {}",
                args.page
            ))
            .into());
        }

        let data = self
            .client
            .get(&["page", "on-demand"], &[("page", args.page.to_string())])
            .await?;
        Ok(format_conversation_list(&data, self.character_limit))
    }
}
