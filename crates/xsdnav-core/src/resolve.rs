//! # Path Resolver
//!
//! Walks a loaded tree along a [`NormalizedPath`] and returns the node chain
//! from the root to the target, or `None` when the tree has no such path.
//!
//! ## Algorithm
//!
//! Start with `chain = [root]`, `current = root`, `index = 0`:
//!
//! - At `index == 0`, a first segment equal to the root's own name is
//!   consumed without descending.
//! - Otherwise the first child of `current` (in list order) whose name equals
//!   the segment is appended and becomes `current`.
//! - If no child matches at `index == 0`, the root's children are searched
//!   once more directly, which accepts paths that omit the root name.
//! - A miss at `index > 0` ends resolution with `None`.
//!
//! Sibling names are expected to be unique; when they are not, the first
//! match wins and is authoritative.

use crate::address::ChainRoute;
use crate::model::SchemaNode;
use crate::path::{normalize, NormalizedPath};

/// Non-empty root-to-target node sequence.
///
/// `chain[0]` is the root and every `chain[i + 1]` is a direct child of
/// `chain[i]`. The child indexes taken along the way are recorded so the
/// chain can be re-addressed without borrowing the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeChain<'a> {
    nodes: Vec<&'a SchemaNode>,
    steps: Vec<usize>,
}

impl<'a> NodeChain<'a> {
    /// Single-node chain holding the root.
    pub(crate) fn at_root(root: &'a SchemaNode) -> Self {
        Self {
            nodes: vec![root],
            steps: Vec::new(),
        }
    }

    /// Descend into child `index` of the current target.
    pub(crate) fn push(&mut self, index: usize, child: &'a SchemaNode) {
        self.nodes.push(child);
        self.steps.push(index);
    }

    /// The tree root.
    pub fn root(&self) -> &'a SchemaNode {
        self.nodes[0]
    }

    /// The terminal node.
    pub fn target(&self) -> &'a SchemaNode {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of nodes, root included (always at least one).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; chains are non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Nodes from root to target.
    pub fn iter(&self) -> impl Iterator<Item = &'a SchemaNode> + '_ {
        self.nodes.iter().copied()
    }

    /// Node names from root to target.
    pub fn names(&self) -> Vec<&'a str> {
        self.nodes.iter().map(|node| node.name.as_str()).collect()
    }

    /// Child-index route of this chain.
    pub fn route(&self) -> ChainRoute {
        ChainRoute::new(self.steps.clone())
    }
}

/// Resolve normalized segments against `root`.
pub fn resolve<'a>(root: &'a SchemaNode, segments: &NormalizedPath) -> Option<NodeChain<'a>> {
    let mut chain = NodeChain::at_root(root);
    let mut current = root;

    for (index, segment) in segments.segments().iter().enumerate() {
        if index == 0 && current.name == *segment {
            continue;
        }

        // At index 0 `current` is still the root, so this search is also the
        // fallback for paths that omit the root name.
        let Some(position) = current.children.iter().position(|c| c.name == *segment) else {
            tracing::trace!(segment = %segment, index, "path segment not found");
            return None;
        };

        current = &current.children[position];
        chain.push(position, current);
    }

    Some(chain)
}

/// Normalize `raw` and resolve it against `root` in one step.
///
/// Rejected and unresolvable paths both yield `None`.
pub fn resolve_path<'a>(root: &'a SchemaNode, raw: &str) -> Option<NodeChain<'a>> {
    match normalize(raw) {
        Ok(segments) => resolve(root, &segments),
        Err(rejection) => {
            tracing::debug!(%rejection, "path not resolvable");
            None
        }
    }
}
