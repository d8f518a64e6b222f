//! Test fixtures
//!
//! Configuration builders with tight timeouts so failure paths finish quickly.

use serde_json::{Value, json};
use snapshot_gateway::config::{Config, GatewayMode, RuntimeEnvironment};
use wiremock::MockServer;

/// Secret used by every fixture configuration
pub const TEST_SECRET: &str = "integration-secret";

/// Public base URL used by every fixture configuration
pub const PUBLIC_BASE_URL: &str = "https://snapshots.example.net";

/// Configuration pointing at `server`, with fast retries and a small breaker
pub fn origin_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.origin.host = server.address().ip().to_string();
    config.origin.port = server.address().port();
    config.origin.timeout_ms = 500;
    config.origin.health_timeout_ms = 200;

    config.reliability.retry_attempts = 3;
    config.reliability.retry_base_delay_ms = 10;
    config.reliability.retry_max_delay_ms = 40;
    config.reliability.retry_jitter = false;
    config.reliability.failure_threshold = 3;
    config.reliability.reset_timeout_ms = 200;

    config.registry.mode = GatewayMode::Production;
    config.registry.environment = RuntimeEnvironment::Production;
    config.registry.fallback_timeout_ms = 500;

    config.signing.secret = Some(TEST_SECRET.to_string());
    config.signing.public_base_url = Some(PUBLIC_BASE_URL.to_string());
    config
}

/// Configuration selecting the mock gateway
pub fn mock_config() -> Config {
    let mut config = Config::default();
    config.registry.mode = GatewayMode::Mock;
    config.registry.environment = RuntimeEnvironment::Test;
    config.signing.secret = Some(TEST_SECRET.to_string());
    config.signing.public_base_url = Some(PUBLIC_BASE_URL.to_string());
    config
}

/// Autoindex-style listing body. `size: None` makes a directory.
pub fn listing_body(entries: &[(&str, Option<u64>, &str)]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|(name, size, mtime)| match size {
                Some(size) => json!({ "name": name, "type": "file", "mtime": mtime, "size": size }),
                None => json!({ "name": name, "type": "directory", "mtime": mtime }),
            })
            .collect(),
    )
}

/// Number of requests `server` received for `method` and `path`
pub async fn requests_to(server: &MockServer, method: &str, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == method && r.url.path() == path)
        .count()
}
