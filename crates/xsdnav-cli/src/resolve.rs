//! # Resolve Subcommand
//!
//! Normalizes a validator location and resolves it against the schema tree,
//! printing every node of the chain with its index path.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use xsdnav_core::{normalize, resolve, IndexPath, PathRejection, SchemaNode, SchemaNodeKind};

use crate::Backend;

/// Arguments for the `xsdnav resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Validator location, e.g. `/eCH-0278:naturalPersonTaxData/eCH-0278:person`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Print the chain as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One node of a resolved chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStep {
    /// Address of the node.
    pub index_path: IndexPath,
    /// Node name.
    pub name: String,
    /// Node kind.
    pub kind: SchemaNodeKind,
    /// Referenced type.
    pub type_name: Option<String>,
}

/// What a location resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The location could not be normalized.
    Rejected(PathRejection),
    /// The location normalized to these segments but matches no node.
    Unresolved(Vec<String>),
    /// The chain from the root to the target.
    Resolved(Vec<ChainStep>),
}

/// Resolve `raw` against `root`.
pub fn resolve_in(root: &SchemaNode, raw: &str) -> Resolution {
    let segments = match normalize(raw) {
        Ok(segments) => segments,
        Err(rejection) => return Resolution::Rejected(rejection),
    };
    let Some(chain) = resolve(root, &segments) else {
        return Resolution::Unresolved(segments.into_segments());
    };

    let route = chain.route();
    let mut index_path = IndexPath::root();
    let mut steps = Vec::with_capacity(chain.len());
    let mut positions = route.steps().iter();
    for node in chain.iter() {
        steps.push(ChainStep {
            index_path: index_path.clone(),
            name: node.name.clone(),
            kind: node.kind,
            type_name: node.type_name.clone(),
        });
        if let Some(&position) = positions.next() {
            index_path = index_path.child(position);
        }
    }
    Resolution::Resolved(steps)
}

/// Execute the resolve subcommand.
///
/// Returns exit code: 0 when the location resolves, 1 when it is rejected
/// or matches no node, 2 on operational error.
pub async fn run_resolve(args: &ResolveArgs, backend: &Backend) -> Result<u8> {
    let source = backend.schema_source()?;
    let root = source.fetch_tree().await.context("failed to fetch schema tree")?;

    match resolve_in(&root, &args.path) {
        Resolution::Rejected(rejection) => {
            println!("REJECTED: {rejection}");
            Ok(1)
        }
        Resolution::Unresolved(segments) => {
            println!("NOT FOUND: /{}", segments.join("/"));
            Ok(1)
        }
        Resolution::Resolved(steps) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                for step in &steps {
                    let type_name = step.type_name.as_deref().unwrap_or("-");
                    println!("{:<12} {} ({type_name})", step.index_path.as_str(), step.name);
                }
            }
            Ok(0)
        }
    }
}
