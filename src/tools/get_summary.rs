//! `jiminny_get_summary` tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{conversation_id_schema, parse_args, ConversationIdArgs, ToolExecutor};
use crate::api::ApiClient;
use crate::error::Result;
use crate::format::{render_summary_report, SectionOutcome};
use crate::mcp::types::{McpTool, ToolAnnotations};

/// Tool name as advertised to the host
pub const NAME: &str = "jiminny_get_summary";

/// Path prefixes tried in order for every summary section
pub const SECTION_PREFIXES: [&str; 2] = ["activity", "conference"];

/// Builds the summary, action items and key points report
#[derive(Debug, Clone)]
pub struct GetSummaryTool {
    client: Arc<ApiClient>,
    character_limit: usize,
}

impl GetSummaryTool {
    /// Create the tool around a shared API client
    pub fn new(client: Arc<ApiClient>, character_limit: usize) -> Self {
        Self {
            client,
            character_limit,
        }
    }

    async fn section(&self, id: &str, suffix: &str) -> SectionOutcome {
        match self.client.probe(&SECTION_PREFIXES, id, suffix).await {
            Ok(outcome) if outcome.is_found() => outcome
                .body
                .map_or(SectionOutcome::Unavailable, SectionOutcome::Found),
            Ok(_) => SectionOutcome::Unavailable,
            Err(e) => {
                tracing::debug!("Section {} failed for {}: {:#}", suffix, id, e);
                SectionOutcome::Failed
            }
        }
    }
}

#[async_trait]
impl ToolExecutor for GetSummaryTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: NAME.to_string(),
            title: Some("Get Conversation Summary".to_string()),
            description: Some(
                "Get the AI-generated summary, action items and key points for a Jiminny \
                 conversation, combined into a single report."
                    .to_string(),
            ),
            input_schema: conversation_id_schema(),
            annotations: Some(ToolAnnotations::read_only("Get Conversation Summary")),
        }
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let id = parse_args::<ConversationIdArgs>(args)?.into_id()?;
        self.client.require_token()?;

        let summary = self.section(&id, "transcription-summary").await;
        let action_items = self.section(&id, "action-items").await;
        let key_points = self.section(&id, "key-points").await;

        Ok(render_summary_report(
            &summary,
            &action_items,
            &key_points,
            self.character_limit,
        ))
    }
}
