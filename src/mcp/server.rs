// MCP server: newline-delimited JSON-RPC over any async reader/writer pair (stdio in production)

use super::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JSONRPC_VERSION, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, PROTOCOL_VERSION, ServerCapabilities, ServerInfo, ToolContent,
    ToolsCapability,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const SERVER_NAME: &str = "econ-mcp";

pub struct McpServer {
    registry: ToolRegistry,
}

fn reply<T: Serialize>(id: Value, result: T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
    }
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run_stdio(&self) -> Result<()> {
        log::info!("{} serving {} tools on stdio", SERVER_NAME, self.registry.len());
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
    }

    /// Read one request per line from `reader`, write one response per line to `writer`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.context("read request")? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(out) = self.handle_line(&line).await {
                writer.write_all(out.as_bytes()).await.context("write response")?;
                writer.write_all(b"\n").await.context("write response")?;
                writer.flush().await.context("flush response")?;
            }
        }
        log::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line; `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(_) => Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error())),
            Ok(raw) => {
                let id = raw.get("id").cloned().unwrap_or(Value::Null);
                // `"id": null` is not a notification; MCP forbids null ids.
                let null_id = raw.get("id").is_some_and(Value::is_null);
                match serde_json::from_value::<JsonRpcRequest>(raw) {
                    Ok(req) if req.jsonrpc == JSONRPC_VERSION && !null_id => self.handle(req).await,
                    _ => Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request())),
                }
            }
        };
        // A response is plain JSON values and strings; encoding cannot fail.
        response.and_then(|r| serde_json::to_string(&r).ok())
    }

    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            log::debug!("notification: {}", request.method);
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => reply(
                id,
                InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability { list_changed: false },
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                },
            ),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => reply(
                id,
                ListToolsResult {
                    tools: self.registry.descriptors(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => {
                log::warn!("unknown method: {}", other);
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(other))
            }
        };
        Some(response)
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => return JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string())),
            None => return JsonRpcResponse::error(id, JsonRpcError::invalid_params("missing params")),
        };
        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
            );
        };

        log::info!("tools/call {} {}", params.name, params.arguments);
        let output = tool.call(params.arguments).await;
        if output.is_error {
            log::warn!("{} returned an error: {}", params.name, output.value);
        }

        let text = serde_json::to_string_pretty(&output.value).unwrap_or_else(|_| output.value.to_string());
        reply(
            id,
            CallToolResult {
                content: vec![ToolContent::text(text)],
                structured_content: output.value,
                is_error: output.is_error,
            },
        )
    }
}
