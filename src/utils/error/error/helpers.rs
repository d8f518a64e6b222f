//! Helper functions for creating and classifying errors

use super::types::GatewayError;

impl GatewayError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    pub fn circuit_open<S: Into<String>>(message: S) -> Self {
        Self::CircuitOpen(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    /// Map a non-success HTTP status from the origin to the matching error kind
    pub fn from_status<S: Into<String>>(status: u16, message: S) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound(message),
            400..=499 => Self::OriginClient { status, message },
            _ => Self::OriginServer { status, message },
        }
    }

    /// Whether the reliability policy may try the call again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Transport(_) | Self::OriginServer { .. }
        )
    }

    /// Whether this failure says something about origin health.
    ///
    /// Only these outcomes move the circuit breaker towards `Open`.
    pub fn counts_against_origin(&self) -> bool {
        self.is_retryable()
    }

    /// Configuration and programming errors that must never be retried or masked
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingSigningSecret | Self::NotInitialized | Self::Config(_)
        )
    }
}
