//! Tests for the HTTP client module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::types::{BackoffType, Method};
use serde_json::{json, Value};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quick_config(server: &MockServer, retries: u32) -> HttpClientConfig {
    HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(50),
        )
        .no_rate_limit()
        .build()
}

fn client_with_backoff(backoff: BackoffType, initial_ms: u64, max_ms: u64) -> HttpClient {
    let config = HttpClientConfig::builder()
        .backoff(
            backoff,
            Duration::from_millis(initial_ms),
            Duration::from_millis(max_ms),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.backoff_type, BackoffType::Exponential);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("chartmogul-mcp/"));
}

#[test]
fn test_request_config_keeps_query_order() {
    let request = RequestConfig::new()
        .queries([("status", "Active"), ("system", "Stripe")])
        .query("per_page", "20")
        .query("cursor", "abc")
        .retries(1);

    let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["status", "system", "per_page", "cursor"]);
    assert_eq!(request.query_value("cursor"), Some("abc"));
    assert_eq!(request.query_value("email"), None);
    assert_eq!(request.max_retries, Some(1));
}

#[test]
fn test_endpoint_joining() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.chartmogul.com/v1/")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.endpoint("/customers"),
        "https://api.chartmogul.com/v1/customers"
    );
    assert_eq!(
        client.endpoint("metrics/mrr"),
        "https://api.chartmogul.com/v1/metrics/mrr"
    );
    assert_eq!(
        client.endpoint("http://localhost:1234/account"),
        "http://localhost:1234/account"
    );
}

#[test_case(BackoffType::Constant, &[100, 100, 100, 100]; "constant")]
#[test_case(BackoffType::Linear, &[100, 200, 300, 400]; "linear")]
#[test_case(BackoffType::Exponential, &[100, 200, 400, 800]; "exponential")]
fn test_backoff_delay(backoff: BackoffType, expected_ms: &[u64]) {
    let client = client_with_backoff(backoff, 100, 10_000);
    let delays: Vec<u64> = (0..4)
        .map(|attempt| client.backoff_delay(attempt).as_millis() as u64)
        .collect();
    assert_eq!(delays, expected_ms);
}

#[test]
fn test_backoff_delay_is_capped() {
    let client = client_with_backoff(BackoffType::Exponential, 100, 500);
    assert_eq!(client.backoff_delay(3), Duration::from_millis(500));
    assert_eq!(client.backoff_delay(40), Duration::from_millis(500));
}

#[test]
fn test_debug_redacts_credentials() {
    let client = HttpClient::with_auth(
        HttpClientConfig::builder().no_rate_limit().build(),
        AuthConfig::api_key("cm-secret"),
    )
    .unwrap();
    let rendered = format!("{client:?}");
    assert!(rendered.contains("HttpClient"));
    assert!(!rendered.contains("cm-secret"));
}

#[test]
fn test_rate_limiter_toggle() {
    let limited = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    assert!(limited.has_rate_limiter());

    let unlimited =
        HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap();
    assert!(!unlimited.has_rate_limiter());
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_get_json_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers/search"))
        .and(query_param("email", "adam@example.com"))
        .and(query_param("per_page", "20"))
        .and(header("user-agent", HttpClientConfig::default().user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [{"uuid": "cus_1"}], "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 0)).unwrap();
    let page: Value = client
        .get_json_with_config(
            "/customers/search",
            RequestConfig::new()
                .query("email", "adam@example.com")
                .query("per_page", "20"),
        )
        .await
        .unwrap();

    assert_eq!(page["entries"][0]["uuid"], "cus_1");
}

#[tokio::test]
async fn test_basic_auth_header() {
    let server = MockServer::start().await;

    // base64("test-key:")
    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .and(header("Authorization", "Basic dGVzdC1rZXk6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Example Co"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/v1", server.uri()))
        .no_rate_limit()
        .build();
    let client = HttpClient::with_auth(config, AuthConfig::api_key("test-key")).unwrap();
    let account: Value = client.get_json("account").await.unwrap();

    assert_eq!(account["name"], "Example Co");
}

#[tokio::test]
async fn test_post_and_patch_send_json_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contacts"))
        .and(body_json(json!({"customer_uuid": "cus_1", "data_source_uuid": "ds_1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"uuid": "con_1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/customers/cus_1"))
        .and(body_json(json!({"city": "Berlin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "cus_1", "city": "Berlin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 0)).unwrap();

    let created: Value = client
        .post_json(
            "/contacts",
            json!({"customer_uuid": "cus_1", "data_source_uuid": "ds_1"}),
        )
        .await
        .unwrap();
    assert_eq!(created["uuid"], "con_1");

    let updated: Value = client
        .patch_json("/customers/cus_1", json!({"city": "Berlin"}))
        .await
        .unwrap();
    assert_eq!(updated["city"], "Berlin");
}

#[tokio::test]
async fn test_absolute_url_bypasses_base() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap();
    let response = client
        .send(
            Method::GET,
            &format!("{}/elsewhere", server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn test_undecodable_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 0)).unwrap();
    let result: crate::error::Result<Value> = client.get_json("/account").await;

    assert!(matches!(result, Err(Error::Decode { .. })));
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data_sources"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data_sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data_sources": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 3)).unwrap();
    let body: Value = client.get_json("/data_sources").await.unwrap();

    assert_eq!(body, json!({"data_sources": []}));
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(3)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 2)).unwrap();
    let err = client
        .send(Method::GET, "/tasks", RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_retry_override() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 3)).unwrap();
    let result = client
        .send(Method::GET, "/tasks", RequestConfig::new().retries(0))
        .await;

    assert!(matches!(result, Err(Error::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn test_rate_limited_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/metrics/mrr"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_string("slow down"),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/metrics/mrr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": []})))
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 2)).unwrap();
    let body: Value = client.get_json("/metrics/mrr").await.unwrap();

    assert_eq!(body["entries"], json!([]));
}

#[tokio::test]
async fn test_rate_limited_without_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/metrics/arr"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 0)).unwrap();
    let err = client
        .send(Method::GET, "/metrics/arr", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 7
        }
    ));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"error":"invalid status"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(quick_config(&server, 3)).unwrap();
    let err = client
        .send(Method::GET, "/customers", RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("invalid status"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limiter_lets_burst_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plans": []})))
        .expect(3)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    for _ in 0..3 {
        let body: Value = client.get_json("/plans").await.unwrap();
        assert_eq!(body["plans"], json!([]));
    }
}
