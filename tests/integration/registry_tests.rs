//! Registry selection against a wiremock origin

use crate::common::{mock_config, origin_config};
use snapshot_gateway::config::{GatewayMode, RuntimeEnvironment};
use snapshot_gateway::{
    GatewayError, GatewayKind, GatewayRegistry, GatewaySelection, SnapshotService, StorageGateway,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn origin(health_status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(health_status))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_production_with_healthy_origin() {
    let server = origin(200).await;
    let registry = GatewayRegistry::new(origin_config(&server));

    let gateway = registry.initialize().await.unwrap();

    assert_eq!(gateway.kind(), GatewayKind::Production);
    assert_eq!(
        registry.selection(),
        Some(GatewaySelection {
            kind: GatewayKind::Production,
            fell_back: false
        })
    );
}

#[tokio::test]
async fn test_production_with_unhealthy_origin_falls_back() {
    let server = origin(503).await;
    let registry = GatewayRegistry::new(origin_config(&server));

    let gateway = registry.initialize().await.unwrap();

    assert_eq!(gateway.kind(), GatewayKind::Mock);
    assert_eq!(registry.selection().map(|s| s.fell_back), Some(true));
    // The fallback still serves data
    assert!(!gateway.list_entries("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_health_check_respects_fallback_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut config = origin_config(&server);
    config.origin.health_timeout_ms = 5_000;
    config.registry.fallback_timeout_ms = 100;
    let registry = GatewayRegistry::new(config);

    let started = std::time::Instant::now();
    let gateway = registry.initialize().await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(gateway.kind(), GatewayKind::Mock);
}

#[tokio::test]
async fn test_fallback_disabled_surfaces_origin_errors() {
    let server = origin(503).await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut config = origin_config(&server);
    config.registry.fallback_enabled = false;
    let registry = GatewayRegistry::new(config);

    let gateway = registry.initialize().await.unwrap();

    assert_eq!(gateway.kind(), GatewayKind::Production);
    assert!(matches!(
        gateway.list_entries("").await,
        Err(GatewayError::OriginServer { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_auto_development_uses_mock_unless_forced() {
    let server = origin(200).await;

    let mut config = origin_config(&server);
    config.registry.mode = GatewayMode::Auto;
    config.registry.environment = RuntimeEnvironment::Development;
    let registry = GatewayRegistry::new(config.clone());
    assert_eq!(
        registry.initialize().await.unwrap().kind(),
        GatewayKind::Mock
    );

    config.registry.force_origin = true;
    let forced = GatewayRegistry::new(config);
    assert_eq!(
        forced.initialize().await.unwrap().kind(),
        GatewayKind::Production
    );
}

#[tokio::test]
async fn test_auto_production_forces_fallback() {
    let server = origin(500).await;

    let mut config = origin_config(&server);
    config.registry.mode = GatewayMode::Auto;
    config.registry.fallback_enabled = false;
    let registry = GatewayRegistry::new(config);

    assert_eq!(
        registry.initialize().await.unwrap().kind(),
        GatewayKind::Mock
    );
    assert_eq!(registry.selection().map(|s| s.fell_back), Some(true));
}

#[tokio::test]
async fn test_second_initialize_keeps_first_instance() {
    let registry = GatewayRegistry::new(mock_config());

    let first = registry.initialize().await.unwrap();
    first.as_mock().unwrap().add_collection("stargaze-1", 1_000);
    let second = registry.initialize().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(second.exists("stargaze-1").await.unwrap());
}

#[tokio::test]
async fn test_facade_before_initialize_is_not_initialized() {
    let registry = Arc::new(GatewayRegistry::new(mock_config()));
    let service = SnapshotService::new(registry.clone());

    assert!(matches!(
        service.list_collections().await,
        Err(GatewayError::NotInitialized)
    ));

    registry.initialize().await.unwrap();
    assert!(service.list_collections().await.is_ok());
}
