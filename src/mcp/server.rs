//! MCP server loop: reads one JSON-RPC message per line, answers in order.
//!
//! Tool arguments are validated against the catalog here, so the dispatcher
//! only ever sees parsed params. Host failures become tool results with
//! `isError`, which is how MCP surfaces them to the agent.

use log::{debug, info, warn};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::catalog::OperationCatalog;
use crate::dispatch::Dispatcher;
use crate::error::{BridgeError, Result};
use crate::rpc::RemoteChannel;

use super::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpMethods, PROTOCOL_VERSION, SERVER_NAME, ToolCallParams,
    ToolCallResult,
};

/// Tool-invocation front end over a dispatcher
pub struct McpServer<C: RemoteChannel> {
    catalog: OperationCatalog,
    dispatcher: Dispatcher<C>,
}

impl<C: RemoteChannel> McpServer<C> {
    /// Create a server exposing the standard catalog
    pub fn new(dispatcher: Dispatcher<C>) -> Self {
        Self {
            catalog: OperationCatalog::standard(),
            dispatcher,
        }
    }

    pub fn catalog(&self) -> &OperationCatalog {
        &self.catalog
    }

    pub fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn tools_list_result(&self) -> Value {
        json!({ "tools": self.catalog.all() })
    }

    /// Run one tool call; only malformed calls and unknown tools are protocol errors
    pub async fn call_tool(&self, params: ToolCallParams) -> std::result::Result<ToolCallResult, JsonRpcError> {
        let (op, args) = match self.catalog.parse_call(&params.name, &params.arguments) {
            Ok(parsed) => parsed,
            Err(BridgeError::UnknownTool(name)) => {
                return Err(JsonRpcError::invalid_params(format!("Unknown tool: {}", name)));
            }
            Err(e) => return Ok(ToolCallResult::error(e.to_string())),
        };

        match self.dispatcher.dispatch(op, args).await {
            Ok(result) => Ok(ToolCallResult::success(result)),
            Err(e) => {
                warn!("Tool {} failed: {}", op, e);
                Ok(ToolCallResult::error(e.to_string()))
            }
        }
    }

    /// Handle one request; notifications yield no response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = match request.id {
            Some(id) => id,
            None => {
                debug!("Notification: {}", request.method);
                return None;
            }
        };

        let outcome = match request.method.as_str() {
            McpMethods::INITIALIZE => Ok(self.initialize_result()),
            McpMethods::PING => Ok(json!({})),
            McpMethods::TOOLS_LIST => Ok(self.tools_list_result()),
            McpMethods::TOOLS_CALL => match serde_json::from_value::<ToolCallParams>(request.params) {
                Ok(params) => self
                    .call_tool(params)
                    .await
                    .and_then(|result| serde_json::to_value(result).map_err(|e| JsonRpcError::invalid_params(e.to_string()))),
                Err(e) => Err(JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e))),
            },
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    /// Handle one raw line; returns the serialized reply, if any
    ///
    /// Text that is not JSON is a parse error. JSON that is not a request is
    /// an invalid request, answered with its `id` when one can be read.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(format!("Parse error: {}", e))),
            Ok(message) => {
                let id = message.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<JsonRpcRequest>(message) {
                    Ok(request) => self.handle_request(request).await?,
                    Err(e) => {
                        warn!("Invalid request: {}", e);
                        JsonRpcResponse::error(id, JsonRpcError::invalid_request(format!("Invalid request: {}", e)))
                    }
                }
            }
        };
        serde_json::to_string(&response).ok()
    }

    /// Serve newline-delimited JSON-RPC until the reader hits EOF
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server ready with {} tools", self.catalog.len());
        let mut lines = BufReader::new(reader).lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(reply) = self.handle_line(line).await {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Serve on the process's stdin/stdout
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}
