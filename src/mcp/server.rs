//! Stdio MCP server
//!
//! Reads newline-delimited JSON-RPC messages from any `AsyncBufRead`
//! and writes one JSON response per line to any `AsyncWrite`. In
//! production these are the process stdin/stdout; tests drive the server
//! through an in-memory duplex pipe.
//!
//! Each request is handled on its own Tokio task. Responses are funnelled
//! through a channel into a single writer task, so lines are never
//! interleaved and handlers share no mutable state.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::mcp::types::{
    CallToolParams, CallToolResponse, Implementation, InitializeParams, InitializeResponse,
    JsonRpcRequest, JsonRpcResponse, ListToolsResponse, ServerCapabilities, INTERNAL_ERROR,
    INVALID_PARAMS, INVALID_REQUEST, METHOD_INITIALIZE, METHOD_NOT_FOUND, METHOD_PING,
    METHOD_TOOLS_CALL, METHOD_TOOLS_LIST, PARSE_ERROR,
};
use crate::tools::ToolRegistry;

/// JSON-RPC error produced while dispatching a request
type DispatchError = (i64, String);

/// MCP server exposing a [`ToolRegistry`]
#[derive(Debug, Clone)]
pub struct McpServer {
    info: Implementation,
    instructions: Option<String>,
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a server with the identity from `config`
    pub fn new(config: &ServerConfig, registry: ToolRegistry) -> Self {
        Self {
            info: Implementation {
                name: config.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: config.instructions.clone(),
            registry: Arc::new(registry),
        }
    }

    /// Serve until `reader` reaches end of input
    ///
    /// In-flight requests are allowed to finish and their responses are
    /// flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns error if reading input fails or the writer task panics
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(line) = rx.recv().await {
                if writer.write_all(line.as_bytes()).await.is_err()
                    || writer.write_all(b"\n").await.is_err()
                    || writer.flush().await.is_err()
                {
                    tracing::warn!("Output closed, dropping remaining responses");
                    break;
                }
            }
        });

        tracing::info!("MCP server {} ready on stdio", self.info.name);

        let mut handlers = JoinSet::new();
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let server = self.clone();
            let tx = tx.clone();
            handlers.spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    match serde_json::to_string(&response) {
                        Ok(serialized) => {
                            let _ = tx.send(serialized);
                        }
                        Err(e) => tracing::error!("Failed to serialize response: {}", e),
                    }
                }
            });
        }

        while let Some(joined) = handlers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Request handler panicked: {}", e);
            }
        }
        drop(tx);
        writer_task.await?;

        tracing::info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw input line
    ///
    /// Returns `None` for notifications, which never get a response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Malformed JSON-RPC input: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    "Parse error",
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(r) => r,
            Err(e) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::failure(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid Request: {}", e),
                ));
            }
        };

        if request.is_notification() {
            tracing::debug!("Notification {}", request.method);
            return None;
        }

        tracing::debug!("Request {}", request.method);
        let id = request.id.clone().unwrap_or(Value::Null);
        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::failure(id, code, message),
        };
        Some(response)
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> std::result::Result<Value, DispatchError> {
        match method {
            METHOD_INITIALIZE => to_result(&self.initialize(params)),
            METHOD_PING => Ok(serde_json::json!({})),
            METHOD_TOOLS_LIST => to_result(&ListToolsResponse {
                tools: self.registry.definitions(),
                next_cursor: None,
            }),
            METHOD_TOOLS_CALL => {
                let params: CallToolParams = params
                    .ok_or_else(|| "missing params".to_string())
                    .and_then(|p| serde_json::from_value(p).map_err(|e| e.to_string()))
                    .map_err(|e| (INVALID_PARAMS, format!("Invalid params: {}", e)))?;

                let arguments = params.arguments.unwrap_or(Value::Null);
                match self.registry.call(&params.name, arguments).await {
                    Some(result) => {
                        to_result(&CallToolResponse::text(result.output, !result.success))
                    }
                    None => Err((INVALID_PARAMS, format!("Unknown tool: {}", params.name))),
                }
            }
            other => Err((METHOD_NOT_FOUND, format!("Method not found: {}", other))),
        }
    }

    fn initialize(&self, params: Option<Value>) -> InitializeResponse {
        let params: InitializeParams = params
            .and_then(|p| match serde_json::from_value(p) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::debug!("Ignoring unparsable initialize params: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            tracing::info!("Client connected: {} {}", client.name, client.version);
        }

        InitializeResponse {
            protocol_version: params.negotiated_version().to_string(),
            capabilities: ServerCapabilities {
                tools: Some(serde_json::json!({"listChanged": false})),
            },
            server_info: self.info.clone(),
            instructions: self.instructions.clone(),
        }
    }
}

fn to_result<T: serde::Serialize>(value: &T) -> std::result::Result<Value, DispatchError> {
    serde_json::to_value(value).map_err(|e| (INTERNAL_ERROR, e.to_string()))
}
