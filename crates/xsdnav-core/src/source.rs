//! # Collaborator Interfaces
//!
//! The navigation engine is transport-agnostic. It consumes already
//! deserialized trees, summaries and validation reports through these traits;
//! concrete sources live in `xsdnav-schema` (local XSD file) and
//! `xsdnav-client` (HTTP backend).
//!
//! Implementations must be `Send + Sync` so they can be shared across async
//! tasks behind an `Arc`.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::{SchemaNode, SchemaSummary};
use crate::validation::{CompareResponse, ValidateResponse, XmlDocument};

/// Provider of the schema tree and summary.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch the root of the schema tree.
    async fn fetch_tree(&self) -> Result<SchemaNode, SourceError>;

    /// Fetch the schema summary.
    async fn fetch_summary(&self) -> Result<SchemaSummary, SourceError>;
}

/// Runs document validation and comparison.
#[async_trait]
pub trait ValidationService: Send + Sync {
    /// Validate one document.
    async fn run_validation(&self, document: &XmlDocument) -> Result<ValidateResponse, SourceError>;

    /// Compare two documents.
    async fn compare(
        &self,
        first: &XmlDocument,
        second: &XmlDocument,
    ) -> Result<CompareResponse, SourceError>;
}

/// A [`SchemaSource`] serving a fixed, already loaded tree.
#[derive(Debug, Clone)]
pub struct StaticSchemaSource {
    root: SchemaNode,
    summary: SchemaSummary,
}

impl StaticSchemaSource {
    /// Serve `root` and `summary` on every call.
    pub fn new(root: SchemaNode, summary: SchemaSummary) -> Self {
        Self { root, summary }
    }

    /// Serve `root` with a summary derived from it.
    pub fn from_root(root: SchemaNode) -> Self {
        let summary = SchemaSummary {
            schema_version: String::new(),
            target_namespace: root.namespace.clone(),
            schema_location: String::new(),
            root_elements: vec![root.name.clone()],
            top_level_types: Vec::new(),
        };
        Self { root, summary }
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    async fn fetch_tree(&self) -> Result<SchemaNode, SourceError> {
        Ok(self.root.clone())
    }

    async fn fetch_summary(&self) -> Result<SchemaSummary, SourceError> {
        Ok(self.summary.clone())
    }
}
