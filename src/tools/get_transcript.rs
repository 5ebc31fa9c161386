//! `jiminny_get_transcript` tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{conversation_id_schema, parse_args, ConversationIdArgs, ToolExecutor};
use crate::api::{ApiClient, ParticipantNames};
use crate::error::Result;
use crate::format::format_transcript;
use crate::format::transcript::transcript_segments;
use crate::mcp::types::{McpTool, ToolAnnotations};

/// Tool name as advertised to the host
pub const NAME: &str = "jiminny_get_transcript";

/// Fetches a conversation transcript as readable dialogue
#[derive(Debug, Clone)]
pub struct GetTranscriptTool {
    client: Arc<ApiClient>,
    character_limit: usize,
}

impl GetTranscriptTool {
    /// Create the tool around a shared API client
    pub fn new(client: Arc<ApiClient>, character_limit: usize) -> Self {
        Self {
            client,
            character_limit,
        }
    }
}

#[async_trait]
impl ToolExecutor for GetTranscriptTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: NAME.to_string(),
            title: Some("Get Conversation Transcript".to_string()),
            description: Some(
                "Get the full transcript of a Jiminny conversation, formatted as readable \
                 dialogue with speaker names and timestamps."
                    .to_string(),
            ),
            input_schema: conversation_id_schema(),
            annotations: Some(ToolAnnotations::read_only("Get Conversation Transcript")),
        }
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let id = parse_args::<ConversationIdArgs>(args)?.into_id()?;

        let data = self
            .client
            .get(&["activity", id.as_str(), "transcription"], &[])
            .await?;

        // Names only matter when there are segments to label.
        let names = if transcript_segments(&data).is_some() {
            self.client.participant_names(&id).await
        } else {
            ParticipantNames::new()
        };
        tracing::debug!("Resolved {} participant names for {}", names.len(), id);

        Ok(format_transcript(&data, &names, self.character_limit))
    }
}
