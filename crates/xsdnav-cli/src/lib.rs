//! # xsdnav-cli — Command-Line Front End
//!
//! Provides the `xsdnav` binary. Schema commands run against a local XSD
//! file when `--xsd` is given and against the backend otherwise; validation
//! and comparison always go to the backend.
//!
//! ## Subcommands
//!
//! - `xsdnav summary` — Schema version, namespace, roots and types.
//! - `xsdnav tree` — Render the tree, optionally expanded along paths.
//! - `xsdnav resolve` — Resolve a validator location to its node chain.
//! - `xsdnav validate` — Validate a document and optionally jump to an error.
//! - `xsdnav compare` — Compare two documents.
//!
//! ```bash
//! xsdnav --xsd schema/eCH-0278-1-0.xsd tree --depth 2
//! xsdnav --xsd schema/eCH-0278-1-0.xsd resolve /eCH-0278:naturalPersonTaxData/eCH-0278:person
//! xsdnav --api-url http://localhost:8000 validate tax.xml --jump 1
//! ```
//!
//! Exit codes: 0 on success, 1 on a domain failure (invalid document,
//! unresolved path), 2 on an operational error.

pub mod compare;
pub mod resolve;
pub mod summary;
pub mod tree;
pub mod validate;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use xsdnav_client::{ClientConfig, XsdnavClient};
use xsdnav_core::{SchemaSource, XmlDocument};
use xsdnav_schema::{LocalSchemaSource, XsdLoadOptions};
use xsdnav_state::VisibleRow;

/// Where schema and validation data come from, as selected by the global
/// flags.
#[derive(Debug, Clone, Default)]
pub struct Backend {
    /// Local XSD file. When set, schema commands never touch the network.
    pub xsd: Option<PathBuf>,
    /// Preferred root element for a local XSD.
    pub root: Option<String>,
    /// Backend base URL, overriding `XSDNAV_API_URL`.
    pub api_url: Option<String>,
}

impl Backend {
    /// Backend client configured from the environment and `--api-url`.
    pub fn client(&self) -> Result<XsdnavClient> {
        let mut config = ClientConfig::from_env().context("invalid client configuration")?;
        if let Some(url) = &self.api_url {
            let token = config.api_token.take();
            let timeout_secs = config.timeout_secs;
            config = ClientConfig::new(url).context("invalid --api-url")?;
            config.api_token = token;
            config.timeout_secs = timeout_secs;
        }
        tracing::debug!(base_url = %config.base_url, "using backend");
        XsdnavClient::new(config).context("failed to build backend client")
    }

    /// The schema collaborator: the local XSD if one was given, the backend
    /// otherwise.
    pub fn schema_source(&self) -> Result<Arc<dyn SchemaSource>> {
        match &self.xsd {
            Some(path) => {
                let options = XsdLoadOptions {
                    preferred_root: self.root.clone(),
                    schema_location: None,
                };
                let source = LocalSchemaSource::from_file(path, &options)
                    .with_context(|| format!("failed to load schema {}", path.display()))?;
                Ok(Arc::new(source))
            }
            None => Ok(Arc::new(self.client()?)),
        }
    }
}

/// Read an XML document from disk for upload.
pub fn read_document(path: &Path) -> Result<XmlDocument> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.xml".to_string());
    Ok(XmlDocument::new(file_name, bytes))
}

/// Render tree rows as indented text, one line per row.
///
/// `>` marks the selection, `-` an expanded node, `+` a collapsed node with
/// children.
pub fn render_rows(rows: &[VisibleRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let cursor = if row.selected { '>' } else { ' ' };
        let marker = match (row.has_children, row.expanded) {
            (false, _) => ' ',
            (true, true) => '-',
            (true, false) => '+',
        };
        out.push_str(&format!(
            "{cursor} {:indent$}{marker} {}  [{}]\n",
            "",
            row.name,
            row.index_path,
            indent = row.depth * 2
        ));
    }
    out
}
