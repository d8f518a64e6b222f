//! Logging bootstrap and log-safe formatting helpers

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{GatewayError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::EnvFilter;

static SIGNATURE_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([?&]md5=)[^&]+").expect("static signature pattern"));

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when present. Calling this twice
/// is an error rather than a panic.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| GatewayError::config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_thread_ids(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    installed.map_err(|e| GatewayError::config(format!("Failed to install logger: {}", e)))
}

/// Strip the signature from a signed link before it is written to a log
pub fn redact_signed_url(url: &str) -> String {
    SIGNATURE_PARAM.replace_all(url, "${1}[REDACTED]").into_owned()
}
