//! MCP stdio server
//!
//! Newline-delimited JSON-RPC over stdin/stdout. Each `tools/call` runs on
//! its own task; responses are funnelled through one writer task so lines
//! never interleave.

use super::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerInfo, JSONRPC_VERSION, MCP_PROTOCOL_VERSION,
};
use crate::error::{Error, Result};
use crate::tools::{self, ToolHandler};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

const INSTRUCTIONS: &str = "Tools for the ChartMogul API: account, data sources, customers, \
contacts, customer notes, opportunities, plans, plan groups, tasks and subscription metrics. \
List tools return at most about `limit` items (default 20). A result of null means the \
ChartMogul request failed.";

/// MCP server over a [`ToolHandler`]
#[derive(Debug)]
pub struct McpServer {
    handler: ToolHandler,
    info: ServerInfo,
}

impl McpServer {
    /// Create a server
    pub fn new(handler: ToolHandler, name: impl Into<String>) -> Self {
        Self {
            handler,
            info: ServerInfo {
                name: name.into(),
                version: crate::VERSION.to_string(),
            },
        }
    }

    /// Server name and version
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Handle one line of input.
    ///
    /// Returns `None` for notifications and blank lines.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(format!("Parse error: {e}")),
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Handle a parsed request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, id = ?request.id, "Request");

        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification");
            return None;
        };

        if !request.jsonrpc.is_empty() && request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version '{}'",
                    request.jsonrpc
                )),
            ));
        }

        let result = match request.method.as_str() {
            "initialize" => self.initialize(),
            "ping" => Ok(json!({})),
            "tools/list" => to_value(&ListToolsResult {
                tools: tools::definitions(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            method => Err(JsonRpcError::method_not_found(method)),
        };

        Some(match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self) -> std::result::Result<Value, JsonRpcError> {
        info!(name = %self.info.name, "Client initialized session");
        to_value(&InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION,
            server_info: self.info.clone(),
            capabilities: json!({ "tools": { "listChanged": false } }),
            instructions: INSTRUCTIONS,
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))
            .and_then(|p| {
                serde_json::from_value(p)
                    .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))
            })?;

        info!(tool = %params.name, "tools/call");
        let result = match self.handler.call(&params.name, params.arguments).await {
            Ok(output) => CallToolResult::output(output),
            Err(e) if e.is_argument_error() => {
                warn!(tool = %params.name, error = %e, "Rejected tool arguments");
                CallToolResult::error(e.to_string())
            }
            Err(e @ Error::UnknownTool { .. }) => {
                return Err(JsonRpcError::invalid_params(e.to_string()))
            }
            Err(e) => return Err(JsonRpcError::internal_error(e.to_string())),
        };

        to_value(&result)
    }

    /// Serve requests from `reader`, writing responses to `writer`, until
    /// the reader reaches EOF. In-flight calls finish before this returns,
    /// even when reading fails.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        let mut reader = BufReader::new(reader);
        let mut in_flight = JoinSet::new();
        let mut read_error = None;

        loop {
            let mut buf = Vec::new();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    read_error = Some(Error::Io(e));
                    break;
                }
            }

            let line = match String::from_utf8(buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Input line is not UTF-8");
                    let _ = tx.send(JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::parse_error(format!("Parse error: {e}")),
                    ));
                    continue;
                }
            };

            let server = Arc::clone(&self);
            let tx = tx.clone();
            in_flight.spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    // receiver only goes away when the writer failed
                    let _ = tx.send(response);
                }
            });

            // reap finished calls so the set does not grow without bound
            while in_flight.try_join_next().is_some() {}
        }

        debug!("Input closed, waiting for in-flight calls");
        while in_flight.join_next().await.is_some() {}
        drop(tx);

        let written = writer_task
            .await
            .map_err(|e| Error::protocol(format!("Writer task failed: {e}")))?;

        match read_error {
            Some(e) => Err(e),
            None => written,
        }
    }

    /// Serve on stdin/stdout until EOF or Ctrl-C
    pub async fn serve_stdio(self: Arc<Self>) -> Result<()> {
        info!(name = %self.info.name, version = %self.info.version, "MCP server listening on stdio");

        tokio::select! {
            result = self.serve(tokio::io::stdin(), tokio::io::stdout()) => {
                info!("MCP server stopped");
                result
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                Ok(())
            }
        }
    }
}

async fn write_responses<W>(mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>, mut writer: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
    }
    Ok(())
}

fn to_value<T: serde::Serialize>(value: &T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
