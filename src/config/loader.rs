//! Configuration loading from environment variables

use super::Config;
use crate::utils::error::{GatewayError, Result};
use std::str::FromStr;
use tracing::debug;

/// Parse an optional variable, reporting the variable name on failure
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", key, e))),
        _ => Ok(None),
    }
}

/// Parse a boolean flag: 1/0, true/false, yes/no, on/off
fn parse_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            other => Err(GatewayError::Config(format!(
                "Invalid {}: expected a boolean, got '{}'",
                key, other
            ))),
        },
        _ => Ok(None),
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source, starting from
    /// defaults. Unset and empty variables keep the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from environment variables");
        let mut config = Self::default();
        config.apply_lookup(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay variables from `lookup` onto this configuration
    pub fn apply_lookup<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Origin
        if let Some(host) = lookup("ORIGIN_HOST").filter(|h| !h.trim().is_empty()) {
            self.origin.host = host.trim().to_string();
        }
        if let Some(port) = parse_var(lookup, "ORIGIN_PORT")? {
            self.origin.port = port;
        }
        if let Some(tls) = parse_flag(lookup, "ORIGIN_TLS")? {
            self.origin.tls = tls;
        }
        if let Some(ms) = parse_var(lookup, "ORIGIN_TIMEOUT_MS")? {
            self.origin.timeout_ms = ms;
        }
        if let Some(ms) = parse_var(lookup, "ORIGIN_HEALTH_TIMEOUT_MS")? {
            self.origin.health_timeout_ms = ms;
        }

        // Reliability
        if let Some(attempts) = parse_var(lookup, "ORIGIN_RETRY_ATTEMPTS")? {
            self.reliability.retry_attempts = attempts;
        }
        if let Some(ms) = parse_var(lookup, "ORIGIN_RETRY_BASE_DELAY_MS")? {
            self.reliability.retry_base_delay_ms = ms;
        }
        if let Some(ms) = parse_var(lookup, "ORIGIN_RETRY_MAX_DELAY_MS")? {
            self.reliability.retry_max_delay_ms = ms;
        }
        if let Some(threshold) = parse_var(lookup, "CIRCUIT_FAILURE_THRESHOLD")? {
            self.reliability.failure_threshold = threshold;
        }
        if let Some(ms) = parse_var(lookup, "CIRCUIT_RESET_TIMEOUT_MS")? {
            self.reliability.reset_timeout_ms = ms;
        }

        // Registry
        if let Some(mode) = parse_var(lookup, "GATEWAY_MODE")? {
            self.registry.mode = mode;
        }
        if let Some(environment) = parse_var(lookup, "APP_ENV")? {
            self.registry.environment = environment;
        }
        if let Some(enabled) = parse_flag(lookup, "GATEWAY_FALLBACK_ENABLED")? {
            self.registry.fallback_enabled = enabled;
        }
        if let Some(ms) = parse_var(lookup, "GATEWAY_FALLBACK_TIMEOUT_MS")? {
            self.registry.fallback_timeout_ms = ms;
        }
        if let Some(force) = parse_flag(lookup, "GATEWAY_FORCE_ORIGIN")? {
            self.registry.force_origin = force;
        }

        // Signing
        if let Some(secret) = lookup("SECURE_LINK_SECRET") {
            self.signing.secret = Some(secret);
        }
        if let Some(base) = lookup("PUBLIC_BASE_URL").filter(|b| !b.trim().is_empty()) {
            self.signing.public_base_url = Some(base.trim().to_string());
        }

        // Mock
        if let Some(seed) = parse_var(lookup, "MOCK_SEED")? {
            self.mock.seed = seed;
        }
        if let Some(latency) = parse_flag(lookup, "MOCK_LATENCY")? {
            self.mock.latency_enabled = latency;
        }

        // Logging
        if let Some(format) = parse_var(lookup, "LOG_FORMAT")? {
            self.logging.format = format;
        }

        Ok(())
    }
}
