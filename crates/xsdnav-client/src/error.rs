//! Backend client error types.

use xsdnav_core::SourceError;

/// Errors from backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Endpoint that was called.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The backend returned a non-2xx status.
    #[error("backend {endpoint} returned {status}: {body}")]
    ApiError {
        /// Endpoint that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// Endpoint that was called.
        endpoint: String,
        /// Underlying decode error.
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ClientError {
    /// Endpoint the failing call targeted, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Http { endpoint, .. }
            | Self::ApiError { endpoint, .. }
            | Self::Deserialization { endpoint, .. } => Some(endpoint),
            Self::Config(_) => None,
        }
    }
}

impl From<ClientError> for SourceError {
    fn from(err: ClientError) -> Self {
        let operation = err.endpoint().unwrap_or("client_init").to_string();
        match err {
            ClientError::Deserialization { .. } => SourceError::invalid_payload(operation, err.to_string()),
            _ => SourceError::transport(operation, err.to_string()),
        }
    }
}
