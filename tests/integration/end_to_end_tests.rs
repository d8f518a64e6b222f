//! Facade scenarios over both gateway implementations

use crate::common::assertions::{assert_link_consistent, parse_signed_url};
use crate::common::fixtures::{PUBLIC_BASE_URL, TEST_SECRET};
use crate::common::{listing_body, mock_config, origin_config};
use snapshot_gateway::core::signing::compute_signature;
use snapshot_gateway::utils::time::{Clock, SystemClock};
use snapshot_gateway::{
    AccessTier, DownloadIssuer, GatewayError, GatewayKind, GatewayRegistry, SnapshotService,
    StaticAdmission, StaticTierResolver, StorageGateway,
};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_service() -> SnapshotService {
    let registry = Arc::new(GatewayRegistry::new(mock_config()));
    registry.initialize().await.unwrap();
    SnapshotService::new(registry)
}

#[tokio::test]
async fn test_mock_mode_storefront_flow() {
    let service = mock_service().await;
    let now = SystemClock.epoch_seconds();

    let collections = service.list_collections().await.unwrap();
    assert!(!collections.is_empty());

    let first = &collections[0];
    let snapshots = service.list_snapshots(&first.id).await.unwrap();
    assert!(!snapshots.is_empty());
    assert!(
        snapshots
            .windows(2)
            .all(|w| w[0].modified_at > w[1].modified_at)
    );

    let url = service
        .build_download_url(&first.id, &snapshots[0].name, "free".parse().unwrap())
        .await
        .unwrap();

    let parts = parse_signed_url(&url);
    assert_eq!(parts.base, PUBLIC_BASE_URL);
    assert_eq!(parts.path, format!("{}/{}", first.id, snapshots[0].name));
    assert_eq!(parts.tier, "free");
    assert!(parts.expires >= now + 3600);
    assert!(parts.expires <= SystemClock.epoch_seconds() + 48 * 3600);
    assert_eq!(
        parts.digest,
        compute_signature(
            TEST_SECRET,
            &format!("/{}", parts.path),
            parts.expires,
            AccessTier::Free
        )
    );
}

#[tokio::test]
async fn test_collection_totals_match_snapshots() {
    let service = mock_service().await;

    for collection in service.list_collections().await.unwrap() {
        let snapshots = service.list_snapshots(&collection.id).await.unwrap();
        assert_eq!(collection.snapshot_count, snapshots.len());
        assert_eq!(
            collection.total_size_bytes,
            snapshots.iter().map(|s| s.size_bytes).sum::<u64>()
        );
        assert_eq!(
            collection.latest_snapshot_at,
            snapshots.first().map(|s| s.modified_at)
        );
    }
}

#[tokio::test]
async fn test_missing_secret_fails_download_action() {
    let mut config = mock_config();
    config.signing.secret = None;
    let registry = Arc::new(GatewayRegistry::new(config));
    registry.initialize().await.unwrap();
    let service = SnapshotService::new(registry);

    // Listings still work without a secret
    let collections = service.list_collections().await.unwrap();
    let err = service
        .build_download_url(&collections[0].id, "anything.tar.zst", AccessTier::Premium)
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MissingSigningSecret));
}

#[tokio::test]
async fn test_production_mode_storefront_flow() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collection/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(&[
            ("osmosis-1", None, "Wed, 10 Jan 2024 00:00:00 GMT"),
            ("cosmoshub-4", None, "Wed, 10 Jan 2024 00:00:00 GMT"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collection/cosmoshub-4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(&[
            ("cosmoshub-4-19400000.tar.lz4", Some(100), "Mon, 08 Jan 2024 00:00:00 GMT"),
            ("cosmoshub-4-19500000.tar.lz4", Some(200), "Wed, 10 Jan 2024 00:00:00 GMT"),
            ("cosmoshub-4-latest.tar.lz4", Some(200), "Wed, 10 Jan 2024 00:00:00 GMT"),
            ("checksums.txt", Some(1), "Wed, 10 Jan 2024 00:00:00 GMT"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collection/osmosis-1/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let registry = Arc::new(GatewayRegistry::new(origin_config(&server)));
    assert_eq!(
        registry.initialize().await.unwrap().kind(),
        GatewayKind::Production
    );
    let service = SnapshotService::new(registry.clone());

    let collections = service.list_collections().await.unwrap();
    let ids: Vec<_> = collections.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["cosmoshub-4", "osmosis-1"]);
    assert_eq!(collections[0].snapshot_count, 2);
    assert_eq!(collections[0].total_size_bytes, 300);
    assert_eq!(collections[1].snapshot_count, 0);

    let snapshots = service.list_snapshots("cosmoshub-4").await.unwrap();
    assert_eq!(snapshots[0].name, "cosmoshub-4-19500000.tar.lz4");
    assert_eq!(snapshots[0].height, Some(19_500_000));
    assert_eq!(snapshots[1].height, Some(19_400_000));

    let link = service
        .build_download_link("cosmoshub-4", &snapshots[0].name, AccessTier::Unlimited)
        .await
        .unwrap();
    assert_link_consistent(&link);

    let metrics = registry.gateway().unwrap().metrics();
    assert_eq!(metrics.request_count, 3);
    assert_eq!(metrics.error_count, 0);
}

#[tokio::test]
async fn test_download_issuer_over_mock() {
    let service = mock_service().await;
    let collection = service.list_collections().await.unwrap()[0].id.clone();
    let snapshot = service.list_snapshots(&collection).await.unwrap()[0]
        .name
        .clone();

    let issuer = DownloadIssuer::new(
        service,
        Arc::new(StaticTierResolver::new(AccessTier::Free).with_tier("whale", AccessTier::Premium)),
        Arc::new(StaticAdmission::allow_all().deny("leech")),
    );

    let link = issuer.issue("whale", &collection, &snapshot).await.unwrap();
    assert_eq!(link.tier, AccessTier::Premium);
    assert_link_consistent(&link);

    assert!(matches!(
        issuer.issue("leech", &collection, &snapshot).await,
        Err(GatewayError::AdmissionDenied(_))
    ));
}

#[tokio::test]
async fn test_concurrent_facade_calls_share_one_gateway() {
    let service = mock_service().await;

    let mut handles = vec![];
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.list_collections().await.unwrap().len()
        }));
    }
    let mut counts = vec![];
    for handle in handles {
        counts.push(handle.await.unwrap());
    }

    assert!(counts.windows(2).all(|w| w[0] == w[1]));
    let gateway = service.registry().gateway().unwrap();
    // One root listing plus one per collection, per call
    assert_eq!(
        gateway.metrics().request_count,
        8 * (counts[0] as u64 + 1)
    );
}
