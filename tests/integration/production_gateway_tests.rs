//! Production gateway against a wiremock origin

use crate::common::{listing_body, origin_config, requests_to};
use snapshot_gateway::config::Config;
use snapshot_gateway::utils::time::SystemClock;
use snapshot_gateway::{CircuitState, GatewayError, ProductionGateway, StorageGateway};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MTIME: &str = "Wed, 10 Jan 2024 00:00:00 GMT";

fn gateway(config: &Config) -> ProductionGateway {
    ProductionGateway::new(config, SystemClock::shared()).unwrap()
}

// ==================== Listing Tests ====================

#[tokio::test]
async fn test_list_root_collections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(&[
            ("noble-1", None, MTIME),
            ("osmosis-1", None, MTIME),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));
    let entries = gateway.list_entries("").await.unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.is_directory()));
    assert_eq!(entries[0].name, "noble-1");
}

#[tokio::test]
async fn test_list_collection_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/noble-1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(&[
            ("noble-1-20240110-000000.tar.zst", Some(1_000), MTIME),
            ("noble-1-latest.tar.zst", Some(1_000), MTIME),
        ])))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));
    let entries = gateway.list_entries("/noble-1/").await.unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.is_file()));
    assert_eq!(entries[0].size_bytes, 1_000);
}

#[tokio::test]
async fn test_listing_404_is_empty_and_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/unknown-1/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));
    let entries = gateway.list_entries("unknown-1").await.unwrap();

    assert!(entries.is_empty());
    assert_eq!(requests_to(&server, "GET", "/collection/unknown-1/").await, 1);
    let metrics = gateway.metrics();
    assert_eq!(metrics.error_count, 0);
    assert_eq!(metrics.circuit_state, CircuitState::Closed);
}

#[tokio::test]
async fn test_malformed_listing_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>index</html>"))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));
    let err = gateway.list_entries("").await.unwrap_err();

    assert!(matches!(err, GatewayError::Parsing(_)));
    assert_eq!(requests_to(&server, "GET", "/collection/").await, 1);
}

// ==================== Retry Tests ====================

#[tokio::test]
async fn test_server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    // attempts - 1 failures, then success
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing_body(&[("noble-1", None, MTIME)])),
        )
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));
    let entries = gateway.list_entries("").await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(requests_to(&server, "GET", "/collection/").await, 3);
    let metrics = gateway.metrics();
    assert_eq!(metrics.request_count, 1);
    assert_eq!(metrics.error_count, 0);
    assert_eq!(metrics.circuit_state, CircuitState::Closed);
}

#[tokio::test]
async fn test_exhausted_retries_surface_final_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));
    let err = gateway.list_entries("").await.unwrap_err();

    assert!(matches!(err, GatewayError::OriginServer { status: 502, .. }));
    assert_eq!(requests_to(&server, "GET", "/collection/").await, 3);
    assert_eq!(gateway.metrics().error_count, 1);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/private/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut config = origin_config(&server);
    config.reliability.failure_threshold = 1;
    let gateway = gateway(&config);
    let err = gateway.list_entries("private").await.unwrap_err();

    assert!(matches!(err, GatewayError::OriginClient { status: 403, .. }));
    assert_eq!(requests_to(&server, "GET", "/collection/private/").await, 1);
    // The origin answered, so the breaker stays closed
    assert_eq!(gateway.circuit_state(), CircuitState::Closed);
}

#[tokio::test]
async fn test_slow_attempts_time_out_and_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing_body(&[]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let mut config = origin_config(&server);
    config.origin.timeout_ms = 100;
    config.reliability.retry_attempts = 2;
    let gateway = gateway(&config);

    let err = gateway.list_entries("").await.unwrap_err();

    assert!(matches!(err, GatewayError::Timeout(_)));
    assert_eq!(requests_to(&server, "GET", "/collection/").await, 2);
}

// ==================== Circuit Breaker Tests ====================

#[tokio::test]
async fn test_open_circuit_fails_fast_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = origin_config(&server);
    config.reliability.retry_attempts = 1;
    config.reliability.failure_threshold = 2;
    config.reliability.reset_timeout_ms = 60_000;
    let gateway = gateway(&config);

    for _ in 0..2 {
        assert!(matches!(
            gateway.list_entries("").await,
            Err(GatewayError::OriginServer { .. })
        ));
    }
    assert_eq!(gateway.circuit_state(), CircuitState::Open);

    let err = gateway.list_entries("").await.unwrap_err();
    assert!(matches!(err, GatewayError::CircuitOpen(_)));
    assert_eq!(requests_to(&server, "GET", "/collection/").await, 2);
    assert_eq!(gateway.metrics().circuit_state, CircuitState::Open);
}

#[tokio::test]
async fn test_half_open_trial_success_closes_circuit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(&[])))
        .mount(&server)
        .await;

    let mut config = origin_config(&server);
    config.reliability.retry_attempts = 1;
    config.reliability.failure_threshold = 2;
    config.reliability.reset_timeout_ms = 50;
    let gateway = gateway(&config);

    let _ = gateway.list_entries("").await;
    let _ = gateway.list_entries("").await;
    assert_eq!(gateway.circuit_state(), CircuitState::Open);

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(gateway.list_entries("").await.unwrap().is_empty());
    assert_eq!(gateway.circuit_state(), CircuitState::Closed);
}

#[tokio::test]
async fn test_circuit_is_per_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = origin_config(&server);
    config.reliability.retry_attempts = 1;
    config.reliability.failure_threshold = 1;
    let tripped = gateway(&config);
    let fresh = gateway(&config);

    let _ = tripped.list_entries("").await;

    assert_eq!(tripped.circuit_state(), CircuitState::Open);
    assert_eq!(fresh.circuit_state(), CircuitState::Closed);
}

// ==================== Existence Tests ====================

#[tokio::test]
async fn test_exists_uses_head() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/collection/noble-1/noble-1-latest.tar.zst"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/collection/noble-1/missing.tar.zst"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));

    assert!(
        gateway
            .exists("noble-1/noble-1-latest.tar.zst")
            .await
            .unwrap()
    );
    assert!(!gateway.exists("/noble-1/missing.tar.zst").await.unwrap());
}

#[tokio::test]
async fn test_exists_encodes_reserved_characters() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/collection/noble-1/snap%20shot%231.tar.zst"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));

    assert!(gateway.exists("noble-1/snap shot#1.tar.zst").await.unwrap());
}

#[tokio::test]
async fn test_exists_persistent_server_error_is_false() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/collection/noble-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));

    assert!(!gateway.exists("noble-1").await.unwrap());
    assert_eq!(requests_to(&server, "HEAD", "/collection/noble-1").await, 3);
}

// ==================== Health Tests ====================

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));

    assert!(gateway.health_check().await);
    // Health probes are not data calls
    assert_eq!(gateway.metrics().request_count, 0);
}

#[tokio::test]
async fn test_health_check_failures_return_false() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));
    assert!(!gateway.health_check().await);
}

#[tokio::test]
async fn test_health_check_uses_short_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;

    let gateway = gateway(&origin_config(&server));

    let started = std::time::Instant::now();
    assert!(!gateway.health_check().await);
    assert!(started.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn test_health_check_unreachable_origin() {
    let mut config = Config::default();
    config.origin.host = "127.0.0.1".to_string();
    config.origin.port = 9;
    config.origin.health_timeout_ms = 200;

    assert!(!gateway(&config).health_check().await);
}
