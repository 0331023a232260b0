//! # Node Addressing
//!
//! Two owned ways of pointing at a node without borrowing the tree:
//!
//! - [`IndexPath`]: the dotted index path used for external addressing. The
//!   root is `"0"`, child *k* of the node at `p` is `"p-k"`. Renderers map it
//!   to their own ids (see [`IndexPath::dom_id`]).
//! - [`ChainRoute`]: the child-index route from the root, as produced by
//!   resolution. It can be carried across `.await` points and turned back
//!   into a [`NodeChain`](crate::resolve::NodeChain) against the same root.
//!
//! Index paths are never used for path resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::SchemaNode;
use crate::resolve::NodeChain;

/// Prefix of the scroll-target id derived from an index path.
pub const DOM_ID_PREFIX: &str = "schema-node-";

/// Dotted index path of a node (`"0"`, `"0-2"`, `"0-2-1"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexPath(String);

impl IndexPath {
    /// Index path of the tree root.
    pub fn root() -> Self {
        Self("0".to_string())
    }

    /// Index path of child `index` of `self`.
    pub fn child(&self, index: usize) -> Self {
        Self(format!("{}-{index}", self.0))
    }

    /// Build from a child-index route.
    pub fn from_route(route: &ChainRoute) -> Self {
        route
            .steps()
            .iter()
            .fold(Self::root(), |path, step| path.child(*step))
    }

    /// Child-index route equivalent to this index path.
    pub fn to_route(&self) -> ChainRoute {
        // Parsing guarantees every piece after the leading "0" is numeric.
        ChainRoute(
            self.0
                .split('-')
                .skip(1)
                .filter_map(|piece| piece.parse().ok())
                .collect(),
        )
    }

    /// Number of edges from the root.
    pub fn depth(&self) -> usize {
        self.0.matches('-').count()
    }

    /// The dotted string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scroll-target id for renderers (`schema-node-0-2-1`).
    pub fn dom_id(&self) -> String {
        format!("{DOM_ID_PREFIX}{}", self.0)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error parsing an [`IndexPath`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid index path \"{0}\" (expected 0, 0-1, 0-1-2, ...)")]
pub struct InvalidIndexPath(pub String);

impl FromStr for IndexPath {
    type Err = InvalidIndexPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pieces = s.split('-');
        if pieces.next() != Some("0") {
            return Err(InvalidIndexPath(s.to_string()));
        }
        for piece in pieces {
            if piece.is_empty() || piece.parse::<usize>().is_err() {
                return Err(InvalidIndexPath(s.to_string()));
            }
        }
        Ok(Self(s.to_string()))
    }
}

/// Child-index route from the root to a node. The empty route is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainRoute(Vec<usize>);

impl ChainRoute {
    /// Route made of the given child indexes.
    pub fn new(steps: Vec<usize>) -> Self {
        Self(steps)
    }

    /// Child indexes, outermost first.
    pub fn steps(&self) -> &[usize] {
        &self.0
    }

    /// Follow the route from `root`, rebuilding the node chain.
    ///
    /// Returns `None` if a step is out of range, which only happens when the
    /// route was produced against a different tree.
    pub fn chain_in<'a>(&self, root: &'a SchemaNode) -> Option<NodeChain<'a>> {
        let mut chain = NodeChain::at_root(root);
        let mut current = root;
        for step in &self.0 {
            current = current.children.get(*step)?;
            chain.push(*step, current);
        }
        Some(chain)
    }

    /// Index path of the route's target.
    pub fn index_path(&self) -> IndexPath {
        IndexPath::from_route(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> SchemaNode {
        SchemaNode::element("Schema").with_children([
            SchemaNode::element("A").with_child(SchemaNode::element("B")),
            SchemaNode::element("C"),
        ])
    }

    #[test]
    fn root_and_child_paths() {
        let root = IndexPath::root();
        assert_eq!(root.as_str(), "0");
        assert_eq!(root.child(2).child(1).as_str(), "0-2-1");
        assert_eq!(root.child(2).child(1).depth(), 2);
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn route_and_index_path_agree() {
        let route = ChainRoute::new(vec![0, 0]);
        let path = route.index_path();
        assert_eq!(path.as_str(), "0-0-0");
        assert_eq!(path.to_route(), route);
    }

    #[test]
    fn dom_id_is_prefixed() {
        assert_eq!(IndexPath::root().child(3).dom_id(), "schema-node-0-3");
    }

    #[test]
    fn parse_accepts_well_formed_paths() {
        assert_eq!("0-10-2".parse::<IndexPath>().unwrap().as_str(), "0-10-2");
        assert!("1-2".parse::<IndexPath>().is_err());
        assert!("0--2".parse::<IndexPath>().is_err());
        assert!("0-x".parse::<IndexPath>().is_err());
        assert!("".parse::<IndexPath>().is_err());
    }

    #[test]
    fn route_rebuilds_chain() {
        let root = tree();
        let chain = ChainRoute::new(vec![0, 0]).chain_in(&root).unwrap();
        let names: Vec<&str> = chain.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Schema", "A", "B"]);
    }

    #[test]
    fn out_of_range_route_yields_none() {
        let root = tree();
        assert!(ChainRoute::new(vec![5]).chain_in(&root).is_none());
    }

    #[test]
    fn empty_route_is_root() {
        let root = tree();
        let chain = ChainRoute::default().chain_in(&root).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.target().name, "Schema");
    }
}
