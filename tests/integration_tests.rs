//! Integration tests using mock HTTP server
//!
//! Exercises the full end-to-end flow: config → engine → HTTP requests →
//! emitted schema/record messages.

use serde_json::json;
use std::time::Duration;
use tap_yandex_direct::config::TapConfig;
use tap_yandex_direct::engine::{Message, SyncConfig, TapEngine};
use tap_yandex_direct::http::{HttpClient, HttpClientConfig};
use tap_yandex_direct::types::BackoffType;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_json(user_agent: Option<&str>) -> String {
    let mut config = json!({
        "access_token": "tok-abc",
        "start_date": "2023-01-01",
        "end_date": "2023-01-31"
    });
    if let Some(agent) = user_agent {
        config["user_agent"] = json!(agent);
    }
    config.to_string()
}

fn engine_for(server: &MockServer, config: &str) -> TapEngine {
    let client_config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(50),
        )
        .no_rate_limit()
        .build();
    TapEngine::with_client(
        TapConfig::from_json(config).unwrap(),
        HttpClient::with_config(client_config),
    )
}

// ============================================================================
// Full Hierarchy Extraction
// ============================================================================

#[tokio::test]
async fn test_full_hierarchy_extraction() {
    let server = MockServer::start().await;

    // The entity endpoints take {"method": "get"} JSON bodies
    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .and(body_partial_json(json!({"method": "get"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"Campaigns": [
                {"Id": 1, "Name": "Spring sale", "State": "ON", "Status": "ACCEPTED",
                 "StartDate": "2023-01-01", "Type": "TEXT_CAMPAIGN"},
                {"Id": 2, "Name": "Winter sale", "State": "OFF", "Status": "DRAFT",
                 "StartDate": "2023-01-15", "Type": "TEXT_CAMPAIGN"}
            ]}
        })))
        .mount(&server)
        .await;

    for (campaign_id, group_id) in [(1, 11), (2, 22)] {
        Mock::given(method("POST"))
            .and(path("/adgroups"))
            .and(body_partial_json(json!({
                "params": {"SelectionCriteria": {"CampaignIds": [campaign_id]}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"AdGroups": [
                    {"Id": group_id, "Name": "g", "CampaignId": campaign_id,
                     "Status": "ACCEPTED", "Type": "TEXT_AD_GROUP"}
                ]}
            })))
            .mount(&server)
            .await;
    }

    for (group_id, ad_id) in [(11, 111), (22, 222)] {
        Mock::given(method("POST"))
            .and(path("/ads"))
            .and(body_partial_json(json!({
                "params": {"SelectionCriteria": {"AdGroupIds": [group_id]}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"Ads": [{"Id": ad_id, "AdGroupId": group_id}]}
            })))
            .mount(&server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/reports"))
        .and(body_partial_json(json!({
            "params": {
                "SelectionCriteria": {"DateFrom": "2023-01-01", "DateTo": "2023-01-31"},
                "ReportType": "AD_PERFORMANCE_REPORT",
                "Format": "TSV"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "Date\tAdId\tCampaignId\tImpressions\tClicks\tCost\n\
             2023-01-05\t111\t1\t500\t25\t12.5\n",
        ))
        .mount(&server)
        .await;

    let mut engine = engine_for(&server, &config_json(None));
    let messages = engine.sync_all().await.unwrap();

    // Depth-first: each campaign's subtree completes before the next campaign
    let record_streams: Vec<_> = messages
        .iter()
        .filter(|m| m.is_record())
        .map(Message::stream)
        .collect();
    assert_eq!(
        record_streams,
        vec![
            "campaigns",
            "ad_groups",
            "ads",
            "campaigns",
            "ad_groups",
            "ads",
            "ad_performance",
        ]
    );

    // TSV report row reshaped into a typed JSON record
    let report = messages
        .iter()
        .find(|m| m.is_record() && m.stream() == "ad_performance")
        .unwrap()
        .to_json();
    assert_eq!(report["record"]["Date"], json!("2023-01-05"));
    assert_eq!(report["record"]["Impressions"], json!(500));
    assert_eq!(report["record"]["Cost"], json!(12.5));

    // Every stream announced its schema before its first record
    for stream in ["campaigns", "ad_groups", "ads", "ad_performance"] {
        let schema_pos = messages
            .iter()
            .position(|m| m.is_schema() && m.stream() == stream)
            .unwrap();
        let record_pos = messages
            .iter()
            .position(|m| m.is_record() && m.stream() == stream)
            .unwrap();
        assert!(schema_pos < record_pos);
    }
}

#[tokio::test]
async fn test_user_agent_propagated_to_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .and(header("User-Agent", "acme-pipeline/2.0"))
        .and(header("Authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"Campaigns": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut engine = engine_for(&server, &config_json(Some("acme-pipeline/2.0")));
    engine.check().await.unwrap();
}

// ============================================================================
// Error Taxonomy
// ============================================================================

#[tokio::test]
async fn test_vendor_error_aborts_run() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"error_string": "Invalid token", "error_detail": "token expired"}
        })))
        .mount(&server)
        .await;

    let mut engine = engine_for(&server, &config_json(None));
    let err = engine.sync_all().await.unwrap_err();

    assert!(err.is_fatal_api());
    let message = err.to_string();
    assert!(message.contains("Invalid token"));
    assert!(message.contains("token expired"));
}

#[tokio::test]
async fn test_offline_report_is_retriable_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reports"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let mut engine = engine_for(&server, &config_json(None));
    let names = vec!["ad_performance".to_string()];
    let err = engine.sync_selected(&names).await.unwrap_err();

    assert!(err.is_retryable());
    assert!(!err.is_fatal_api());
}

#[tokio::test]
async fn test_transient_500_recovers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"Campaigns": [{"Id": 1, "Name": "A"}]}
        })))
        .mount(&server)
        .await;

    let mut engine = engine_for(&server, &config_json(None));
    let names = vec!["campaigns".to_string()];
    let messages = engine.sync_selected(&names).await.unwrap();

    assert_eq!(messages.iter().filter(|m| m.is_record()).count(), 1);
}

// ============================================================================
// Config Loading
// ============================================================================

#[tokio::test]
async fn test_config_from_file_drives_engine() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config_json(None).as_bytes()).unwrap();
    let config = TapConfig::from_file(file.path()).unwrap();

    assert_eq!(config.access_token, "tok-abc");
    assert_eq!(
        config.base_url(),
        "https://api.direct.yandex.com/json/v5"
    );
}

#[tokio::test]
async fn test_max_records_across_hierarchy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"Campaigns": [{"Id": 1, "Name": "A"}, {"Id": 2, "Name": "B"}]}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/adgroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"AdGroups": [{"Id": 10, "CampaignId": 1}]}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"Ads": [{"Id": 100, "AdGroupId": 10}]}
        })))
        .mount(&server)
        .await;

    let mut engine = engine_for(&server, &config_json(None))
        .with_sync_config(SyncConfig::new().with_max_records(2));
    let names = vec!["campaigns".to_string()];
    let messages = engine.sync_selected(&names).await.unwrap();

    assert_eq!(messages.iter().filter(|m| m.is_record()).count(), 2);
}
