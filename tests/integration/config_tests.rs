//! Configuration loading from files and variable sources

use snapshot_gateway::config::{Config, GatewayMode, LogFormat};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_yaml_file_round_trip() {
    let mut config = Config::default();
    config.origin.host = "nginx".to_string();
    config.registry.mode = GatewayMode::Production;
    config.logging.format = LogFormat::Json;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();

    let loaded = Config::from_file(file.path()).await.unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_lookup_overrides_defaults() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ORIGIN_HOST", "origin.internal"),
        ("ORIGIN_TLS", "true"),
        ("ORIGIN_PORT", "443"),
        ("GATEWAY_MODE", "mock"),
    ]);

    let config = Config::from_lookup(|key: &str| vars.get(key).map(|v| v.to_string())).unwrap();

    assert_eq!(config.origin.base_url(), "https://origin.internal:443");
    assert_eq!(config.registry.mode, GatewayMode::Mock);
    assert_eq!(config.public_base_url(), "https://origin.internal:443");
}

#[test]
fn test_lookup_rejects_zero_attempts() {
    let err = Config::from_lookup(|key: &str| {
        (key == "ORIGIN_RETRY_ATTEMPTS").then(|| "0".to_string())
    })
    .unwrap_err();

    assert!(err.to_string().contains("Retry attempts"));
}
