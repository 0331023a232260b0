//! # Session Tree
//!
//! The schema tree shared by every view in one session. The first caller
//! fetches it from the [`SchemaSource`]; concurrent callers wait for that
//! fetch instead of starting their own. A failed fetch is not remembered, so
//! the next caller tries again.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex as AsyncMutex;

use xsdnav_core::{resolve_path, ChainRoute, SchemaNode, SchemaSource, SourceError};

/// Lazily loaded, replaceable schema tree.
pub struct SessionTree {
    source: Arc<dyn SchemaSource>,
    root: RwLock<Option<Arc<SchemaNode>>>,
    // Serializes fetches. Held across the fetch await, hence tokio's mutex.
    load_gate: AsyncMutex<()>,
}

impl std::fmt::Debug for SessionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTree")
            .field("loaded", &self.root.read().is_some())
            .finish_non_exhaustive()
    }
}

impl SessionTree {
    /// A handle that will load from `source` on first use.
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            source,
            root: RwLock::new(None),
            load_gate: AsyncMutex::new(()),
        }
    }

    /// The collaborator this tree loads from.
    pub fn source(&self) -> &Arc<dyn SchemaSource> {
        &self.source
    }

    /// The tree, fetching it if nobody has yet.
    pub async fn root(&self) -> Result<Arc<SchemaNode>, SourceError> {
        if let Some(root) = self.current() {
            return Ok(root);
        }

        let _gate = self.load_gate.lock().await;
        if let Some(root) = self.current() {
            return Ok(root);
        }

        let root = match self.source.fetch_tree().await {
            Ok(root) => Arc::new(root),
            Err(e) => {
                tracing::warn!(error = %e, "schema tree fetch failed");
                return Err(e);
            }
        };
        tracing::info!(root = %root.name, nodes = root.subtree_len(), "schema tree loaded");
        *self.root.write() = Some(Arc::clone(&root));
        Ok(root)
    }

    /// The tree if it is already loaded.
    pub fn current(&self) -> Option<Arc<SchemaNode>> {
        self.root.read().clone()
    }

    /// Install a new tree wholesale. Routes computed against the old tree
    /// are not carried over.
    pub fn replace(&self, root: SchemaNode) -> Arc<SchemaNode> {
        let root = Arc::new(root);
        *self.root.write() = Some(Arc::clone(&root));
        tracing::info!(root = %root.name, "schema tree replaced");
        root
    }

    /// Resolve a validator location against the tree, loading it first if
    /// needed. A tree that cannot be loaded resolves nothing.
    pub async fn resolve_path(&self, raw: &str) -> Option<ChainRoute> {
        let root = self.root().await.ok()?;
        resolve_path(&root, raw).map(|chain| chain.route())
    }
}
