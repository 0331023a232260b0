//! # Explorer Session
//!
//! Host state for the schema tree view: summary, navigator, selection, the
//! pending jump and the load/error flags. Every operation is an explicit
//! state transition; renderers read [`ExplorerSession::visible_rows`],
//! [`ExplorerSession::details`] and [`ExplorerSession::take_scroll_target`]
//! after each one.
//!
//! ## Jumps
//!
//! A session subscribes to the coordinator before it reads
//! [`JumpCoordinator::consume_pending_path`], so a request accepted at any
//! point after creation is either already pending or queued on the
//! subscription. The queue is drained by the listener started with
//! [`ExplorerSession::spawn_jump_listener`]; a path seen twice is applied
//! twice, which is harmless because completion is idempotent. A
//! pending jump is applied as soon as a tree is present: the chain is
//! expanded, the target selected, and the coordinator slot released. A path
//! that does not resolve also releases the slot, so the initiator is never
//! left busy.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;

use xsdnav_core::{
    resolve_path, Cardinality, IndexPath, SchemaNode, SchemaNodeKind, SchemaSummary,
};

use crate::jump::{JumpCoordinator, JumpSubscription};
use crate::navigator::{TreeNavigator, VisibleRow};
use crate::session::SessionTree;

/// Shown when the tree cannot be fetched.
pub const TREE_LOAD_FAILED: &str = "Failed to load schema tree.";

/// Shown when the summary cannot be fetched.
pub const SUMMARY_LOAD_FAILED: &str = "Failed to load schema summary.";

/// Result of applying a pending jump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The target was expanded into view and selected.
    Selected {
        /// The requested location.
        path: String,
        /// Address of the selected node.
        target: IndexPath,
    },
    /// The location does not exist in the tree; the jump was dropped.
    Unresolved {
        /// The requested location.
        path: String,
    },
}

/// An attribute as shown in the details pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDetails {
    /// Attribute name.
    pub name: String,
    /// Attribute type, if declared.
    pub type_name: Option<String>,
    /// Allowed values.
    pub enum_values: Vec<String>,
    /// Attribute group the attribute came from.
    pub source: Option<String>,
    /// Whether the source group is one of the called-out tax groups.
    pub highlighted: bool,
}

/// Details of the selected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    /// Address of the node.
    pub index_path: IndexPath,
    /// Node name.
    pub name: String,
    /// Node kind.
    pub kind: SchemaNodeKind,
    /// Referenced type.
    pub type_name: Option<String>,
    /// Namespace.
    pub namespace: String,
    /// Occurrence constraints.
    pub cardinality: Option<Cardinality>,
    /// Allowed values, if the content is an enumeration.
    pub enumeration: Option<Vec<String>>,
    /// Attributes in declaration order.
    pub attributes: Vec<AttributeDetails>,
    /// Number of direct children.
    pub child_count: usize,
}

impl NodeDetails {
    fn of(node: &SchemaNode, index_path: IndexPath) -> Self {
        Self {
            index_path,
            name: node.name.clone(),
            kind: node.kind,
            type_name: node.type_name.clone(),
            namespace: node.namespace.clone(),
            cardinality: node.cardinality,
            enumeration: node.enumeration.clone(),
            attributes: node
                .attributes
                .iter()
                .map(|attr| AttributeDetails {
                    name: attr.name.clone(),
                    type_name: attr.type_name.clone(),
                    enum_values: attr.enum_values.clone(),
                    source: attr.source.clone(),
                    highlighted: attr.is_highlighted(),
                })
                .collect(),
            child_count: node.children.len(),
        }
    }
}

#[derive(Debug, Default)]
struct ExplorerState {
    loading: bool,
    error: Option<String>,
    summary: Option<SchemaSummary>,
    navigator: TreeNavigator,
    selected: Option<IndexPath>,
    pending_jump: Option<String>,
    scroll_target: Option<IndexPath>,
}

/// State behind one tree view.
#[derive(Debug)]
pub struct ExplorerSession {
    tree: Arc<SessionTree>,
    jumps: Arc<JumpCoordinator>,
    subscription: Mutex<Option<JumpSubscription>>,
    state: Mutex<ExplorerState>,
}

impl ExplorerSession {
    /// A session in the loading state. Picks up a jump that was requested
    /// before the session existed.
    pub fn new(tree: Arc<SessionTree>, jumps: Arc<JumpCoordinator>) -> Self {
        let subscription = jumps.subscribe();
        let pending_jump = jumps.consume_pending_path();
        if let Some(path) = &pending_jump {
            tracing::debug!(path = %path, "explorer picked up pending jump");
        }
        Self {
            tree,
            jumps,
            subscription: Mutex::new(Some(subscription)),
            state: Mutex::new(ExplorerState {
                loading: true,
                pending_jump,
                ..ExplorerState::default()
            }),
        }
    }

    /// Fetch summary and tree. On success the root is selected and any
    /// pending jump applied.
    pub async fn load(&self) -> Option<JumpOutcome> {
        let (summary, root) = tokio::join!(self.tree.source().fetch_summary(), self.tree.root());

        let mut state = self.state.lock();
        match summary {
            Ok(summary) => state.summary = Some(summary),
            Err(e) => {
                tracing::warn!(error = %e, "schema summary unavailable");
                state.error = Some(SUMMARY_LOAD_FAILED.to_string());
            }
        }

        state.loading = false;
        match root {
            Ok(root) => {
                state.navigator.set_root(root);
                state.selected = Some(IndexPath::root());
                self.apply_pending_jump_locked(&mut state)
            }
            Err(_) => {
                state.error = Some(TREE_LOAD_FAILED.to_string());
                None
            }
        }
    }

    /// Install a replacement tree, as after a reload.
    pub fn set_tree(&self, root: Arc<SchemaNode>) -> Option<JumpOutcome> {
        let mut state = self.state.lock();
        state.navigator.set_root(root);
        state.selected = Some(IndexPath::root());
        state.loading = false;
        self.apply_pending_jump_locked(&mut state)
    }

    /// Handle a jump notification.
    pub fn on_jump_requested(&self, path: String) -> Option<JumpOutcome> {
        let mut state = self.state.lock();
        state.pending_jump = Some(path);
        self.apply_pending_jump_locked(&mut state)
    }

    /// Apply the pending jump, if there is one and a tree to apply it to.
    pub fn apply_pending_jump(&self) -> Option<JumpOutcome> {
        let mut state = self.state.lock();
        self.apply_pending_jump_locked(&mut state)
    }

    fn apply_pending_jump_locked(&self, state: &mut ExplorerState) -> Option<JumpOutcome> {
        let root = Arc::clone(state.navigator.root()?);
        let path = state.pending_jump.clone()?;

        let Some(chain) = resolve_path(&root, &path) else {
            tracing::debug!(path = %path, "jump target not in tree");
            self.jumps.complete(&path);
            state.pending_jump = None;
            return Some(JumpOutcome::Unresolved { path });
        };

        state.navigator.expand_chain(&chain);
        let target = chain.route().index_path();
        state.selected = Some(target.clone());
        state.scroll_target = Some(target.clone());
        self.jumps.complete(&path);
        state.pending_jump = None;

        tracing::debug!(path = %path, target = %target, "jump applied");
        Some(JumpOutcome::Selected { path, target })
    }

    /// Select the node at `path`. Returns `false` if there is no such node.
    pub fn select(&self, path: &IndexPath) -> bool {
        let mut state = self.state.lock();
        if state.navigator.node_at(path).is_none() {
            return false;
        }
        state.selected = Some(path.clone());
        state.scroll_target = Some(path.clone());
        true
    }

    /// Toggle the expand state of the node at `path`. Returns the new state,
    /// or `None` if there is no such node.
    pub fn toggle(&self, path: &IndexPath) -> Option<bool> {
        let mut state = self.state.lock();
        let root = Arc::clone(state.navigator.root()?);
        let chain = path.to_route().chain_in(&root)?;
        let node = chain.target();
        if state.navigator.is_expanded(node) {
            state.navigator.collapse(node);
            Some(false)
        } else {
            state.navigator.expand(node);
            Some(true)
        }
    }

    /// Expand the chain leading to the node at the validator location `raw`
    /// without changing the selection. Returns the node's address.
    pub fn expand_path(&self, raw: &str) -> Option<IndexPath> {
        let mut state = self.state.lock();
        let root = Arc::clone(state.navigator.root()?);
        let chain = resolve_path(&root, raw)?;
        state.navigator.expand_chain(&chain);
        Some(chain.route().index_path())
    }

    /// Expand every node less than `depth` edges below the root.
    pub fn expand_to_depth(&self, depth: usize) {
        let mut state = self.state.lock();
        let Some(root) = state.navigator.root().cloned() else {
            return;
        };
        let mut stack = vec![(root.as_ref(), 0usize)];
        while let Some((node, level)) = stack.pop() {
            if level >= depth {
                continue;
            }
            state.navigator.expand(node);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
    }

    /// Expand the chain to every node called `name`. Returns how many were
    /// found.
    pub fn reveal_by_name(&self, name: &str) -> usize {
        let mut state = self.state.lock();
        let Some(root) = state.navigator.root().cloned() else {
            return 0;
        };
        let paths = state.navigator.find_by_name(name).to_vec();
        for path in &paths {
            if let Some(chain) = path.to_route().chain_in(&root) {
                state.navigator.expand_chain(&chain);
            }
        }
        paths.len()
    }

    /// Expand every node of the tree.
    pub fn expand_all(&self) {
        let mut state = self.state.lock();
        let Some(root) = state.navigator.root().cloned() else {
            return;
        };
        for node in root.iter() {
            state.navigator.expand(node);
        }
    }

    /// Collapse everything but the root.
    pub fn collapse_all(&self) {
        self.state.lock().navigator.collapse_all();
    }

    /// Details of the selected node.
    pub fn details(&self) -> Option<NodeDetails> {
        let state = self.state.lock();
        let selected = state.selected.clone()?;
        let node = state.navigator.node_at(&selected)?;
        Some(NodeDetails::of(node, selected))
    }

    /// Rows of the expanded tree in display order.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let state = self.state.lock();
        state.navigator.visible_rows(state.selected.as_ref())
    }

    /// The node a renderer should scroll to, once.
    pub fn take_scroll_target(&self) -> Option<IndexPath> {
        self.state.lock().scroll_target.take()
    }

    /// Address of the selected node.
    pub fn selected(&self) -> Option<IndexPath> {
        self.state.lock().selected.clone()
    }

    /// The jump waiting for a tree, if any.
    pub fn pending_jump(&self) -> Option<String> {
        self.state.lock().pending_jump.clone()
    }

    /// Whether the initial load is still running.
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// User-facing load failure message.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// The schema summary, once loaded.
    pub fn summary(&self) -> Option<SchemaSummary> {
        self.state.lock().summary.clone()
    }

    /// Apply every jump request the coordinator accepted since this session
    /// was created. The task ends when the coordinator clears its
    /// subscriptions. A second listener subscribes afresh.
    pub fn spawn_jump_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let mut subscription = self
            .subscription
            .lock()
            .take()
            .unwrap_or_else(|| self.jumps.subscribe());
        let session = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(path) = subscription.recv().await {
                session.on_jump_requested(path);
            }
            tracing::debug!("jump listener stopped");
        })
    }
}
