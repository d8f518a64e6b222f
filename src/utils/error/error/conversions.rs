//! Type conversions for GatewayError

use super::types::GatewayError;

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return GatewayError::Timeout(err.to_string());
        }
        if err.is_decode() {
            return GatewayError::Parsing(err.to_string());
        }
        if let Some(status) = err.status() {
            return GatewayError::from_status(status.as_u16(), err.to_string());
        }
        if err.is_builder() {
            return GatewayError::Config(format!("Invalid origin request: {}", err));
        }
        GatewayError::Transport(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for GatewayError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        GatewayError::Timeout(err.to_string())
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::Config(format!("Invalid URL: {}", err))
    }
}
