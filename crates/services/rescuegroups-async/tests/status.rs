use std::time::Duration;

use rescuegroups_async::{Client, RescueGroupsConfig, ServiceStatus, StatusMonitor};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/http/v2.json";

fn config_for(server: &MockServer) -> RescueGroupsConfig {
    RescueGroupsConfig::new()
        .with_endpoint(format!("{}{ENDPOINT}", server.uri()))
        .with_api_key("test-api-key")
}

async fn mount_ok_probe(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "data": {"1": {"animalID": "1"}}
        })))
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

#[tokio::test]
async fn missing_credential_is_not_configured_without_network() {
    let server = MockServer::start().await;
    mount_ok_probe(&server).await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server).without_api_key()));

    assert_eq!(monitor.status(false).await, ServiceStatus::NotConfigured);
    assert_eq!(monitor.status(true).await, ServiceStatus::NotConfigured);
    assert_eq!(request_count(&server).await, 0);
    assert!(monitor.snapshot().await.is_none());
}

#[tokio::test]
async fn blank_credential_is_not_configured() {
    let server = MockServer::start().await;
    mount_ok_probe(&server).await;

    let monitor = StatusMonitor::new(Client::with_config(
        config_for(&server).with_api_key("   "),
    ));

    assert_eq!(monitor.status(false).await, ServiceStatus::NotConfigured);
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn repeated_checks_within_window_probe_once() {
    let server = MockServer::start().await;
    mount_ok_probe(&server).await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server)));

    assert_eq!(monitor.status(false).await, ServiceStatus::Configured);
    assert_eq!(monitor.status(false).await, ServiceStatus::Configured);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn forced_refresh_probes_again() {
    let server = MockServer::start().await;
    mount_ok_probe(&server).await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server)));

    monitor.status(false).await;
    assert_eq!(monitor.status(true).await, ServiceStatus::Configured);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn expired_window_probes_again() {
    let server = MockServer::start().await;
    mount_ok_probe(&server).await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server)))
        .with_ttl(Duration::from_millis(50));

    monitor.status(false).await;
    tokio::time::sleep(Duration::from_millis(120)).await;
    monitor.status(false).await;
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn invalidate_forces_next_probe() {
    let server = MockServer::start().await;
    mount_ok_probe(&server).await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server)));

    monitor.status(false).await;
    monitor.invalidate().await;
    assert!(monitor.snapshot().await.is_none());
    monitor.status(false).await;
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn failed_probe_reports_error_and_is_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "error",
            "messages": {"generalMessages": [{"messageText": "Invalid API key"}]}
        })))
        .mount(&server)
        .await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server)));

    assert_eq!(monitor.status(false).await, ServiceStatus::Error);
    assert_eq!(monitor.status(false).await, ServiceStatus::Error);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn unreachable_service_reports_error() {
    let config = RescueGroupsConfig::new()
        .with_endpoint("http://127.0.0.1:1/http/v2.json")
        .with_api_key("test-api-key");
    let monitor = StatusMonitor::new(Client::with_config(config));

    assert_eq!(monitor.status(false).await, ServiceStatus::Error);
}

#[tokio::test]
async fn probe_is_a_minimal_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(serde_json::json!({
            "apikey": "test-api-key",
            "objectType": "animals",
            "objectAction": "search",
            "search": {
                "resultStart": 0,
                "resultLimit": 1,
                "calcFoundRows": "No",
                "filters": [],
                "fields": ["animalID"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server)));
    assert_eq!(monitor.status(false).await, ServiceStatus::Configured);
}

#[tokio::test]
async fn snapshot_records_check_time() {
    let server = MockServer::start().await;
    mount_ok_probe(&server).await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server)));
    let before = chrono::Utc::now();
    monitor.status(false).await;

    let snapshot = monitor.snapshot().await.unwrap();
    assert_eq!(snapshot.status, ServiceStatus::Configured);
    assert!(snapshot.checked_at >= before);
}

#[tokio::test]
async fn concurrent_checks_share_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "ok"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let monitor = StatusMonitor::new(Client::with_config(config_for(&server)));

    let results = tokio::join!(
        monitor.status(false),
        monitor.status(false),
        monitor.status(false),
        monitor.status(false),
        monitor.status(false),
        monitor.status(false),
        monitor.status(false),
        monitor.status(false),
    );
    let results = [
        results.0, results.1, results.2, results.3, results.4, results.5, results.6, results.7,
    ];

    assert!(results.iter().all(|s| *s == ServiceStatus::Configured));
    assert_eq!(request_count(&server).await, 1);
    assert_eq!(
        monitor.snapshot().await.map(|s| s.status),
        Some(ServiceStatus::Configured)
    );
}
