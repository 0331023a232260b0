//! Backend client configuration.
//!
//! Defaults point at a backend on the local machine. Override via
//! environment variables or explicit construction.

use url::Url;
use zeroize::Zeroizing;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the xsdnav backend.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the backend. Always ends with `/`.
    pub base_url: Url,
    /// Optional bearer token sent with every request.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for `base_url` with no token and the default timeout.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `XSDNAV_API_URL` (default: `http://127.0.0.1:8000`)
    /// - `XSDNAV_API_TOKEN` (optional)
    /// - `XSDNAV_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("XSDNAV_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout_secs = match std::env::var("XSDNAV_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: parse_base_url("XSDNAV_API_URL", &raw_url)?,
            api_token: std::env::var("XSDNAV_API_TOKEN")
                .ok()
                .filter(|token| !token.is_empty())
                .map(Zeroizing::new),
            timeout_secs,
        })
    }

    /// Configuration pointing at a local mock server (for testing).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        Ok(Self::new(&format!("http://127.0.0.1:{port}"))?.with_timeout_secs(5))
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Zeroizing::new(token.into()));
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Parse a base URL and make sure relative joins land under its path.
fn parse_base_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A URL did not parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    /// `XSDNAV_TIMEOUT_SECS` is not a whole number of seconds.
    #[error("invalid XSDNAV_TIMEOUT_SECS value \"{0}\"")]
    InvalidTimeout(String),
    /// The token contains characters not allowed in a header.
    #[error("API token is not a valid header value")]
    InvalidToken,
}
