//! Typed client for the schema explorer endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/schema/summary` | Schema version, namespace, top-level names |
//! | GET    | `/api/schema/tree` | Fully expanded tree, wrapped as `{ "root": ... }` |

use xsdnav_core::{SchemaNode, SchemaSummary, SchemaTreeResponse};

use crate::error::ClientError;

/// Path prefix of the schema endpoints.
const API_PREFIX: &str = "api/schema";

/// Client for the schema explorer endpoints.
#[derive(Debug, Clone)]
pub struct SchemaClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl SchemaClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch the schema summary.
    ///
    /// Calls `GET {base_url}/api/schema/summary`.
    pub async fn summary(&self) -> Result<SchemaSummary, ClientError> {
        let endpoint = "GET /api/schema/summary";
        let url = format!("{}{}/summary", self.base_url, API_PREFIX);

        let resp = crate::retry::retry_send(endpoint, || self.http.get(&url).send())
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        crate::read_json(endpoint, resp).await
    }

    /// Fetch the schema tree envelope.
    ///
    /// Calls `GET {base_url}/api/schema/tree`.
    pub async fn tree(&self) -> Result<SchemaTreeResponse, ClientError> {
        let endpoint = "GET /api/schema/tree";
        let url = format!("{}{}/tree", self.base_url, API_PREFIX);

        let resp = crate::retry::retry_send(endpoint, || self.http.get(&url).send())
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        crate::read_json(endpoint, resp).await
    }

    /// Fetch the tree and unwrap its root.
    pub async fn root(&self) -> Result<SchemaNode, ClientError> {
        self.tree().await.map(|response| response.root)
    }
}
