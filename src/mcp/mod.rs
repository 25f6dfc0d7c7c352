//! Model Context Protocol surface
//!
//! JSON-RPC 2.0 over newline-delimited stdio. Supports `initialize`,
//! `ping`, `tools/list` and `tools/call`.

mod protocol;
mod server;

pub use protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerInfo, TextContent, JSONRPC_VERSION,
    MCP_PROTOCOL_VERSION,
};
pub use server::McpServer;

#[cfg(test)]
mod tests;
