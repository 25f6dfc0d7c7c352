//! Tests for the MCP server

use super::*;
use crate::auth::AuthConfig;
use crate::chartmogul::ChartMogulClient;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::PaginationConfig;
use crate::tools::{ToolHandler, TOOLS};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_for(uri: &str) -> McpServer {
    let config = HttpClientConfig::builder()
        .base_url(uri)
        .max_retries(0)
        .no_rate_limit()
        .build();
    let http = HttpClient::with_auth(config, AuthConfig::api_key("test-key")).unwrap();
    let handler = ToolHandler::new(ChartMogulClient::from_http(http), PaginationConfig::default());
    McpServer::new(handler, "mcp-chartmogul")
}

fn offline_server() -> McpServer {
    // nothing listens here; only used where no request leaves the process
    server_for("http://127.0.0.1:9")
}

async fn respond(server: &McpServer, message: Value) -> Option<JsonRpcResponse> {
    server.handle_line(&message.to_string()).await
}

fn tool_text(response: &JsonRpcResponse) -> (String, bool) {
    let result: CallToolResult =
        serde_json::from_value(response.result.clone().unwrap()).unwrap();
    assert_eq!(result.content.len(), 1);
    assert_eq!(result.content[0].content_type, "text");
    (result.content[0].text.clone(), result.is_error)
}

// ============================================================================
// Protocol Types
// ============================================================================

#[test]
fn test_request_without_id_is_notification() {
    let request: JsonRpcRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
    assert!(request.is_notification());
    assert!(request.params.is_none());
}

#[test]
fn test_null_id_is_not_notification() {
    let request: JsonRpcRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
    assert_eq!(request.id, Some(Value::Null));
    assert!(!request.is_notification());
}

#[test]
fn test_response_skips_absent_fields() {
    let ok = serde_json::to_value(JsonRpcResponse::success(json!(1), json!({}))).unwrap();
    assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": {}}));

    let err = serde_json::to_value(JsonRpcResponse::error(
        json!("a"),
        JsonRpcError::method_not_found("nope"),
    ))
    .unwrap();
    assert_eq!(
        err,
        json!({"jsonrpc": "2.0", "id": "a", "error": {"code": -32601, "message": "Method not found: nope"}})
    );
}

#[test]
fn test_call_result_null_output() {
    let result = CallToolResult::output(None);
    assert_eq!(result.content[0].text, "null");
    assert!(!result.is_error);

    let value = serde_json::to_value(CallToolResult::error("bad")).unwrap();
    assert_eq!(
        value,
        json!({"content": [{"type": "text", "text": "bad"}], "isError": true})
    );
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn test_initialize() {
    let server = offline_server();
    let response = respond(
        &server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "0"}
        }}),
    )
    .await
    .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
    assert_eq!(result["serverInfo"]["name"], "mcp-chartmogul");
    assert_eq!(result["serverInfo"]["version"], crate::VERSION);
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["instructions"].as_str().unwrap().contains("null"));
}

#[tokio::test]
async fn test_ping() {
    let server = offline_server();
    let response = respond(&server, json!({"jsonrpc": "2.0", "id": "p", "method": "ping"}))
        .await
        .unwrap();
    assert_eq!(response.id, json!("p"));
    assert_eq!(response.result, Some(json!({})));
}

#[tokio::test]
async fn test_notification_gets_no_response() {
    let server = offline_server();
    let response = respond(
        &server,
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .await;
    assert!(response.is_none());
    assert!(server.handle_line("   ").await.is_none());
}

#[tokio::test]
async fn test_null_id_gets_response() {
    let server = offline_server();
    let response = respond(&server, json!({"jsonrpc": "2.0", "id": null, "method": "ping"}))
        .await
        .unwrap();
    assert_eq!(response.id, Value::Null);
    assert_eq!(response.result, Some(json!({})));
    assert!(response.error.is_none());
}

#[tokio::test]
async fn test_parse_error() {
    let server = offline_server();
    let response = server.handle_line("{not json").await.unwrap();
    assert_eq!(response.id, Value::Null);
    assert_eq!(response.error.unwrap().code, -32700);
}

#[tokio::test]
async fn test_unknown_method() {
    let server = offline_server();
    let response = respond(&server, json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"}))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_wrong_jsonrpc_version() {
    let server = offline_server();
    let response = respond(&server, json!({"jsonrpc": "1.0", "id": 9, "method": "ping"}))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32600);
}

#[tokio::test]
async fn test_tools_list() {
    let server = offline_server();
    let response = respond(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await
        .unwrap();

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), TOOLS.len());
    let search = tools.iter().find(|t| t["name"] == "search_customers").unwrap();
    assert_eq!(search["inputSchema"]["required"], json!(["email"]));
}

#[tokio::test]
async fn test_call_unknown_tool_is_invalid_params() {
    let server = offline_server();
    let response = respond(
        &server,
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "drop_everything"}}),
    )
    .await
    .unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, -32602);
    assert!(error.message.contains("drop_everything"));
}

#[tokio::test]
async fn test_call_without_params() {
    let server = offline_server();
    let response = respond(&server, json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call"}))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn test_call_with_bad_arguments_is_tool_error() {
    let server = offline_server();
    let response = respond(
        &server,
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
               "params": {"name": "retrieve_customer", "arguments": {}}}),
    )
    .await
    .unwrap();
    let (text, is_error) = tool_text(&response);
    assert!(is_error);
    assert!(text.contains("uuid"));
}

#[tokio::test]
async fn test_call_tool_success() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Example Co", "currency": "USD", "time_zone": "UTC", "week_start_on": "monday"
        })))
        .mount(&mock)
        .await;

    let server = server_for(&mock.uri());
    let response = respond(
        &server,
        json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call",
               "params": {"name": "retrieve_account", "arguments": {}}}),
    )
    .await
    .unwrap();

    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    let output: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(output["name"], "Example Co");
    assert_eq!(output["currency"], "USD");
}

#[tokio::test]
async fn test_call_tool_provider_failure_is_null() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&mock)
        .await;

    let server = server_for(&mock.uri());
    let response = respond(
        &server,
        json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call",
               "params": {"name": "retrieve_account"}}),
    )
    .await
    .unwrap();

    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    assert_eq!(text, "null");
}

// ============================================================================
// Transport
// ============================================================================

#[tokio::test]
async fn test_serve_over_duplex() {
    let server = Arc::new(offline_server());
    let (client, server_io) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server_io);
    let task = tokio::spawn(server.serve(server_read, server_write));

    let (client_read, mut client_write) = tokio::io::split(client);
    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}),
    ];
    for message in &input {
        client_write
            .write_all(format!("{message}\n").as_bytes())
            .await
            .unwrap();
    }
    client_write.write_all(b"garbage\n").await.unwrap();
    client_write.shutdown().await.unwrap();

    let mut lines = BufReader::new(client_read).lines();
    let mut responses = Vec::new();
    while let Some(line) = lines.next_line().await.unwrap() {
        responses.push(serde_json::from_str::<JsonRpcResponse>(&line).unwrap());
    }
    task.await.unwrap().unwrap();

    // three responses; the notification is silent and order is not guaranteed
    assert_eq!(responses.len(), 3);
    let mut ids: Vec<String> = responses.iter().map(|r| r.id.to_string()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "null"]);
}

#[tokio::test]
async fn test_serve_survives_non_utf8_line() {
    let server = Arc::new(offline_server());
    let (client, server_io) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server_io);
    let task = tokio::spawn(server.serve(server_read, server_write));

    let (client_read, mut client_write) = tokio::io::split(client);
    let first = json!({"jsonrpc": "2.0", "id": 1, "method": "ping"});
    let second = json!({"jsonrpc": "2.0", "id": 2, "method": "ping"});
    client_write
        .write_all(format!("{first}\n").as_bytes())
        .await
        .unwrap();
    client_write.write_all(b"\xff\xfe garbage\n").await.unwrap();
    client_write
        .write_all(format!("{second}\n").as_bytes())
        .await
        .unwrap();
    client_write.shutdown().await.unwrap();

    let mut lines = BufReader::new(client_read).lines();
    let mut responses = Vec::new();
    while let Some(line) = lines.next_line().await.unwrap() {
        responses.push(serde_json::from_str::<JsonRpcResponse>(&line).unwrap());
    }
    task.await.unwrap().unwrap();

    assert_eq!(responses.len(), 3);
    let mut ids: Vec<String> = responses.iter().map(|r| r.id.to_string()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "null"]);

    let bad = responses.iter().find(|r| r.id.is_null()).unwrap();
    assert_eq!(bad.error.as_ref().unwrap().code, -32700);
}
