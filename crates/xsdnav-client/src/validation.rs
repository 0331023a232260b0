//! Typed client for document validation and comparison.
//!
//! | Method | Path | Multipart fields |
//! |--------|------|------------------|
//! | POST   | `/api/validate` | `file` |
//! | POST   | `/api/compare` | `xml1`, `xml2` |

use reqwest::multipart::{Form, Part};

use xsdnav_core::{CompareResponse, ValidateResponse, XmlDocument};

use crate::error::ClientError;

/// Client for the validation endpoints.
#[derive(Debug, Clone)]
pub struct ValidationClient {
    http: reqwest::Client,
    base_url: url::Url,
}

fn document_part(document: &XmlDocument) -> Part {
    Part::bytes(document.bytes.clone()).file_name(document.file_name.clone())
}

impl ValidationClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Validate one document.
    ///
    /// Calls `POST {base_url}/api/validate` with the document as `file`.
    pub async fn validate(&self, document: &XmlDocument) -> Result<ValidateResponse, ClientError> {
        let endpoint = "POST /api/validate";
        let url = format!("{}api/validate", self.base_url);

        let resp = crate::retry::retry_send(endpoint, || {
            let form = Form::new().part("file", document_part(document));
            self.http.post(&url).multipart(form).send()
        })
        .await
        .map_err(|e| ClientError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        crate::read_json(endpoint, resp).await
    }

    /// Compare two documents.
    ///
    /// Calls `POST {base_url}/api/compare` with the documents as `xml1` and
    /// `xml2`.
    pub async fn compare(
        &self,
        first: &XmlDocument,
        second: &XmlDocument,
    ) -> Result<CompareResponse, ClientError> {
        let endpoint = "POST /api/compare";
        let url = format!("{}api/compare", self.base_url);

        let resp = crate::retry::retry_send(endpoint, || {
            let form = Form::new()
                .part("xml1", document_part(first))
                .part("xml2", document_part(second));
            self.http.post(&url).multipart(form).send()
        })
        .await
        .map_err(|e| ClientError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        crate::read_json(endpoint, resp).await
    }
}
