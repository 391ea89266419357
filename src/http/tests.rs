//! Tests for the HTTP client module

use super::*;
use crate::auth::BearerAuthenticator;
use crate::types::BackoffType;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.direct.yandex.com/json/v5")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("Accept-Language", "en")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://api.direct.yandex.com/json/v5".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("Accept-Language"),
        Some(&"en".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .header("processingMode", "auto")
        .json(serde_json::json!({"method": "get"}))
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert_eq!(
        config.headers.get("processingMode"),
        Some(&"auto".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[test]
fn test_calculate_backoff() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_secs(1),
        )
        .build();
    let client = HttpClient::with_config(config);

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    // Capped at max_backoff
    assert_eq!(client.calculate_backoff(10), Duration::from_secs(1));
}

#[tokio::test]
async fn test_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .and(body_partial_json(serde_json::json!({"method": "get"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": {"Campaigns": [{"Id": 1}]}
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config);

    let response = client
        .post("/campaigns", serde_json::json!({"method": "get"}))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let body = response.json().unwrap();
    assert_eq!(body["result"]["Campaigns"][0]["Id"], 1);
}

#[tokio::test]
async fn test_bearer_auth_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": {}})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();
    let client = HttpClient::with_auth(config, BearerAuthenticator::new("tok-123"));

    let response = client.post("/campaigns", serde_json::json!({})).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": {}})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(100),
        )
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config);

    let response = client.post("/campaigns", serde_json::json!({})).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_client_error_returned_not_raised() {
    // A 400 carries the vendor's error payload; the transport must hand it
    // back for stream-level validation instead of raising.
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"error_string": "Bad request", "error_detail": "FieldNames is empty"}
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config);

    let response = client.post("/campaigns", serde_json::json!({})).await.unwrap();
    assert_eq!(response.status, 400);
    assert!(response.body.contains("FieldNames is empty"));
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_offline_report_status_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reports"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config);

    let response = client.post("/reports", serde_json::json!({})).await.unwrap();
    assert_eq!(response.status, 202);
}

#[tokio::test]
async fn test_server_error_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(1)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(10),
        )
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config);

    let err = client
        .post("/campaigns", serde_json::json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        crate::error::Error::HttpStatus { status: 503, .. }
    ));
}

#[tokio::test]
async fn test_full_url_bypasses_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url("https://example.invalid")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config);

    let response = client
        .get(&format!("{}/ping", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.body, "pong");
}
