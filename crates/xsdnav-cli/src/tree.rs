//! # Tree Subcommand
//!
//! Loads the schema tree into an explorer session and prints the visible
//! rows. By default only the root's children show; `--depth`, `--expand` and
//! `--all` open more of the tree.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;

use xsdnav_core::SchemaSource;
use xsdnav_state::{ExplorerSession, JumpCoordinator, SessionTree, VisibleRow};

use crate::{render_rows, Backend};

/// Arguments for the `xsdnav tree` subcommand.
#[derive(Args, Debug, Default)]
pub struct TreeArgs {
    /// Expand the chain leading to this validator location. Repeatable.
    #[arg(long = "expand", value_name = "PATH")]
    pub expand: Vec<String>,

    /// Expand every node fewer than N levels below the root.
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Expand the whole tree.
    #[arg(long)]
    pub all: bool,

    /// Print the rows as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Rows produced for a tree request, plus the `--expand` paths that did not
/// resolve.
#[derive(Debug)]
pub struct TreeView {
    /// Visible rows in display order.
    pub rows: Vec<VisibleRow>,
    /// Locations that matched no node.
    pub unresolved: Vec<String>,
}

/// Load the tree from `source` and apply the expansion flags.
pub async fn build_tree_view(source: Arc<dyn SchemaSource>, args: &TreeArgs) -> Result<TreeView> {
    let explorer = ExplorerSession::new(
        Arc::new(SessionTree::new(source)),
        Arc::new(JumpCoordinator::new()),
    );
    explorer.load().await;

    let rows = explorer.visible_rows();
    if rows.is_empty() {
        bail!(explorer.error().unwrap_or_else(|| "schema tree is empty".to_string()));
    }

    if args.all {
        explorer.expand_all();
    } else if let Some(depth) = args.depth {
        explorer.expand_to_depth(depth);
    }

    let mut unresolved = Vec::new();
    for path in &args.expand {
        if explorer.expand_path(path).is_none() {
            tracing::debug!(path = %path, "expand path not in tree");
            unresolved.push(path.clone());
        }
    }

    Ok(TreeView {
        rows: explorer.visible_rows(),
        unresolved,
    })
}

/// Execute the tree subcommand.
///
/// Returns exit code: 0 on success, 1 if an `--expand` path did not
/// resolve, 2 on operational error.
pub async fn run_tree(args: &TreeArgs, backend: &Backend) -> Result<u8> {
    let view = build_tree_view(backend.schema_source()?, args).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view.rows)?);
    } else {
        print!("{}", render_rows(&view.rows));
    }

    for path in &view.unresolved {
        println!("WARN: {path} is not in the schema tree");
    }
    Ok(if view.unresolved.is_empty() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsdnav_core::{SchemaNode, StaticSchemaSource};

    fn source() -> Arc<dyn SchemaSource> {
        Arc::new(StaticSchemaSource::from_root(
            SchemaNode::element("Schema").with_children([
                SchemaNode::element("A").with_child(SchemaNode::element("B").with_child(SchemaNode::element("D"))),
                SchemaNode::element("C"),
            ]),
        ))
    }

    fn names(view: &TreeView) -> Vec<&str> {
        view.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn default_view_shows_root_children() {
        let view = build_tree_view(source(), &TreeArgs::default()).await.unwrap();
        assert_eq!(names(&view), ["Schema", "A", "C"]);
        assert!(view.rows[0].selected);
    }

    #[tokio::test]
    async fn expand_opens_chain_and_collects_misses() {
        let args = TreeArgs {
            expand: vec!["/x:Schema/x:A/x:B".into(), "/Schema/Z".into()],
            ..TreeArgs::default()
        };
        let view = build_tree_view(source(), &args).await.unwrap();
        assert_eq!(names(&view), ["Schema", "A", "B", "D", "C"]);
        assert_eq!(view.unresolved, ["/Schema/Z"]);
    }

    #[tokio::test]
    async fn depth_limits_expansion() {
        let args = TreeArgs {
            depth: Some(2),
            ..TreeArgs::default()
        };
        let view = build_tree_view(source(), &args).await.unwrap();
        assert_eq!(names(&view), ["Schema", "A", "B", "C"]);
    }

    #[tokio::test]
    async fn all_expands_everything() {
        let args = TreeArgs {
            all: true,
            ..TreeArgs::default()
        };
        let view = build_tree_view(source(), &args).await.unwrap();
        assert_eq!(view.rows.len(), 5);
    }
}
