//! # xsdnav-client — Typed Client for the xsdnav Backend
//!
//! Provides typed access to the backend that serves the schema tree and runs
//! validation:
//! - **Schema** via `/api/schema/summary` and `/api/schema/tree`
//! - **Validation** via `/api/validate` and `/api/compare` (multipart uploads)
//!
//! [`XsdnavClient`] implements the [`SchemaSource`] and [`ValidationService`]
//! traits from `xsdnav-core`, so the navigation state can run directly
//! against a live backend.
//!
//! ## Retries
//!
//! Transport failures are retried with exponential backoff (200ms, 400ms,
//! 800ms). Non-2xx responses are reported as [`ClientError::ApiError`] with
//! the response body and are never retried.

pub mod config;
pub mod error;
pub(crate) mod retry;
pub mod schema;
pub mod validation;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use xsdnav_core::{
    CompareResponse, SchemaNode, SchemaSource, SchemaSummary, SourceError, ValidateResponse,
    ValidationService, XmlDocument,
};

/// Top-level backend client. Holds one sub-client per endpoint group.
#[derive(Debug, Clone)]
pub struct XsdnavClient {
    schema: schema::SchemaClient,
    validation: validation::ValidationClient,
}

impl XsdnavClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| ClientError::Config(ConfigError::InvalidToken))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        tracing::debug!(base_url = %config.base_url, "backend client ready");
        Ok(Self {
            schema: schema::SchemaClient::new(http.clone(), config.base_url.clone()),
            validation: validation::ValidationClient::new(http, config.base_url),
        })
    }

    /// Access the schema client.
    pub fn schema(&self) -> &schema::SchemaClient {
        &self.schema
    }

    /// Access the validation client.
    pub fn validation(&self) -> &validation::ValidationClient {
        &self.validation
    }
}

#[async_trait]
impl SchemaSource for XsdnavClient {
    async fn fetch_tree(&self) -> Result<SchemaNode, SourceError> {
        Ok(self.schema.root().await?)
    }

    async fn fetch_summary(&self) -> Result<SchemaSummary, SourceError> {
        Ok(self.schema.summary().await?)
    }
}

#[async_trait]
impl ValidationService for XsdnavClient {
    async fn run_validation(&self, document: &XmlDocument) -> Result<ValidateResponse, SourceError> {
        Ok(self.validation.validate(document).await?)
    }

    async fn compare(
        &self,
        first: &XmlDocument,
        second: &XmlDocument,
    ) -> Result<CompareResponse, SourceError> {
        Ok(self.validation.compare(first, second).await?)
    }
}

/// Check the status and decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::ApiError {
            endpoint: endpoint.into(),
            status,
            body,
        });
    }

    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })
}
