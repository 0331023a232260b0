//! A [`SchemaSource`] backed by an XSD file loaded into memory.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use xsdnav_core::{SchemaNode, SchemaSource, SchemaSummary, SourceError};

use crate::xsd::{SchemaLoadError, XsdLoadOptions, XsdSchema};

/// Serves an already expanded schema. Cloning shares the loaded tree.
#[derive(Debug, Clone)]
pub struct LocalSchemaSource {
    schema: Arc<XsdSchema>,
}

impl LocalSchemaSource {
    /// Wrap a loaded schema.
    pub fn new(schema: XsdSchema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }

    /// Load the schema at `path` and serve it.
    pub fn from_file(path: impl AsRef<Path>, options: &XsdLoadOptions) -> Result<Self, SchemaLoadError> {
        XsdSchema::from_file(path, options).map(Self::new)
    }

    /// The loaded schema.
    pub fn schema(&self) -> &XsdSchema {
        &self.schema
    }
}

#[async_trait]
impl SchemaSource for LocalSchemaSource {
    async fn fetch_tree(&self) -> Result<SchemaNode, SourceError> {
        Ok(self.schema.root().clone())
    }

    async fn fetch_summary(&self) -> Result<SchemaSummary, SourceError> {
        Ok(self.schema.summary().clone())
    }
}
