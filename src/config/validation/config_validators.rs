//! Configuration section validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use url::Url;

impl Validate for OriginConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating origin configuration");

        if self.host.trim().is_empty() {
            return Err("Origin host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Origin port must be greater than 0".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Origin timeout must be greater than 0".to_string());
        }

        if self.health_timeout_ms == 0 {
            return Err("Origin health timeout must be greater than 0".to_string());
        }

        Url::parse(&self.base_url())
            .map_err(|e| format!("Origin host '{}' does not form a valid URL: {}", self.host, e))?;

        Ok(())
    }
}

impl Validate for ReliabilityConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating reliability configuration");

        if self.retry_attempts == 0 {
            return Err("Retry attempts must be at least 1".to_string());
        }

        if self.retry_max_delay_ms < self.retry_base_delay_ms {
            return Err(format!(
                "Retry max delay ({}ms) must not be below base delay ({}ms)",
                self.retry_max_delay_ms, self.retry_base_delay_ms
            ));
        }

        if self.failure_threshold == 0 {
            return Err("Circuit failure threshold must be greater than 0".to_string());
        }

        if self.reset_timeout_ms == 0 {
            return Err("Circuit reset timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.fallback_enabled && self.fallback_timeout_ms == 0 {
            return Err("Fallback timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for SigningConfig {
    fn validate(&self) -> Result<(), String> {
        // A missing secret only fails when a link is signed
        if let Some(base) = &self.public_base_url {
            let parsed =
                Url::parse(base).map_err(|e| format!("Invalid public base URL '{}': {}", base, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!(
                    "Public base URL must use http or https, got '{}'",
                    parsed.scheme()
                ));
            }
            if parsed.query().is_some() {
                return Err("Public base URL must not carry a query string".to_string());
            }
        }
        Ok(())
    }
}

impl Validate for MockConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.size_variance) {
            return Err(format!(
                "Mock size variance must be in [0, 1), got {}",
                self.size_variance
            ));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
