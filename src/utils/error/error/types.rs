//! Error types for the snapshot gateway

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Path not present on the origin. Listings never surface this; they map it to `[]`
    #[error("Not found: {0}")]
    NotFound(String),

    /// A single attempt exceeded its deadline
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Connection-level failure talking to the origin
    #[error("Transport error: {0}")]
    Transport(String),

    /// 5xx-class response from the origin
    #[error("Origin server error ({status}): {message}")]
    OriginServer { status: u16, message: String },

    /// 4xx-class response from the origin, other than 404 on listings
    #[error("Origin client error ({status}): {message}")]
    OriginClient { status: u16, message: String },

    /// The circuit breaker rejected the call without touching the network
    #[error("Circuit breaker is open: {0}")]
    CircuitOpen(String),

    /// No shared secret is configured for link signing
    #[error("Secure link secret is not configured")]
    MissingSigningSecret,

    /// The facade was used before the registry resolved a gateway
    #[error("Storage gateway has not been initialized")]
    NotInitialized,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Origin payload could not be decoded
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// The bandwidth admission check refused the download
    #[error("Download not admitted: {0}")]
    AdmissionDenied(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
