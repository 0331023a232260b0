//! # Tree Navigator
//!
//! Expand/collapse state and addressing for one loaded tree.
//!
//! Expansion is keyed by node identity, not by name: two `person` nodes in
//! different branches are tracked separately. Identity is the node's address
//! inside the tree the navigator holds an `Arc` to; the tree is never mutated
//! after load, so addresses are stable for as long as the navigator keeps it.
//!
//! [`TreeNavigator::set_root`] walks the tree once in pre-order and builds two
//! indices: identity → [`IndexPath`] for external addressing (scroll targets,
//! row ids), and name → index paths for lookup by name.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use xsdnav_core::{IndexPath, NodeChain, SchemaNode, SchemaNodeKind};

/// Identity of a node within the navigator's current tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    /// Identity of `node`. Only meaningful while the tree owning `node` is
    /// alive.
    pub fn of(node: &SchemaNode) -> Self {
        Self(node as *const SchemaNode as usize)
    }
}

/// One line of a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRow {
    /// Address of the node.
    pub index_path: IndexPath,
    /// Edges from the root.
    pub depth: usize,
    /// Node name.
    pub name: String,
    /// Node kind.
    pub kind: SchemaNodeKind,
    /// Whether the node's children are shown.
    pub expanded: bool,
    /// Whether the node has children at all.
    pub has_children: bool,
    /// Whether the node is the current selection.
    pub selected: bool,
}

/// Expand state and indices over a single tree.
#[derive(Debug, Default)]
pub struct TreeNavigator {
    root: Option<Arc<SchemaNode>>,
    expanded: HashSet<NodeKey>,
    paths: HashMap<NodeKey, IndexPath>,
    by_name: HashMap<String, Vec<IndexPath>>,
}

impl TreeNavigator {
    /// A navigator with no tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tree. Drops all previous state, expands the root and
    /// reindexes.
    pub fn set_root(&mut self, root: Arc<SchemaNode>) {
        self.expanded.clear();
        self.paths.clear();
        self.by_name.clear();

        let mut stack = vec![(root.as_ref(), IndexPath::root())];
        while let Some((node, path)) = stack.pop() {
            for (index, child) in node.children.iter().enumerate().rev() {
                stack.push((child, path.child(index)));
            }
            self.by_name.entry(node.name.clone()).or_default().push(path.clone());
            self.paths.insert(NodeKey::of(node), path);
        }

        self.expanded.insert(NodeKey::of(&root));
        tracing::debug!(nodes = self.paths.len(), root = %root.name, "navigator reindexed");
        self.root = Some(root);
    }

    /// The current tree, if any.
    pub fn root(&self) -> Option<&Arc<SchemaNode>> {
        self.root.as_ref()
    }

    /// Expand every node of `chain`. Nodes that do not belong to the current
    /// tree are ignored. Idempotent.
    pub fn expand_chain(&mut self, chain: &NodeChain<'_>) {
        for node in chain.iter() {
            self.expand(node);
        }
    }

    /// Expand one node. Returns `false` if the node is not part of the
    /// current tree.
    pub fn expand(&mut self, node: &SchemaNode) -> bool {
        let key = NodeKey::of(node);
        if !self.paths.contains_key(&key) {
            return false;
        }
        self.expanded.insert(key);
        true
    }

    /// Collapse one node. Its descendants keep their own state.
    pub fn collapse(&mut self, node: &SchemaNode) {
        self.expanded.remove(&NodeKey::of(node));
    }

    /// Collapse everything except the root, which stays expanded.
    pub fn collapse_all(&mut self) {
        let mut expanded = HashSet::new();
        if let Some(root) = &self.root {
            expanded.insert(NodeKey::of(root));
        }
        self.expanded = expanded;
    }

    /// Whether `node` is expanded.
    pub fn is_expanded(&self, node: &SchemaNode) -> bool {
        self.expanded.contains(&NodeKey::of(node))
    }

    /// Number of expanded nodes.
    pub fn expanded_len(&self) -> usize {
        self.expanded.len()
    }

    /// Index path assigned to `node`, if it belongs to the current tree.
    pub fn index_path(&self, node: &SchemaNode) -> Option<&IndexPath> {
        self.paths.get(&NodeKey::of(node))
    }

    /// Index paths of every node named `name`, in pre-order.
    pub fn find_by_name(&self, name: &str) -> &[IndexPath] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Node at `path` in the current tree.
    pub fn node_at(&self, path: &IndexPath) -> Option<&SchemaNode> {
        let root = self.root.as_deref()?;
        path.to_route().chain_in(root).map(|chain| chain.target())
    }

    /// Pre-order projection of the expanded part of the tree.
    pub fn visible_rows(&self, selected: Option<&IndexPath>) -> Vec<VisibleRow> {
        let Some(root) = self.root.as_deref() else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        let mut stack = vec![(root, IndexPath::root())];
        while let Some((node, path)) = stack.pop() {
            let expanded = self.is_expanded(node);
            if expanded {
                for (index, child) in node.children.iter().enumerate().rev() {
                    stack.push((child, path.child(index)));
                }
            }
            rows.push(VisibleRow {
                depth: path.depth(),
                name: node.name.clone(),
                kind: node.kind,
                expanded,
                has_children: node.has_children(),
                selected: selected == Some(&path),
                index_path: path,
            });
        }
        rows
    }
}
