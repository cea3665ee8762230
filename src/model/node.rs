//! Node in the routing graph.

use serde::{Deserialize, Serialize};

/// Dense node identifier: the node's position in `GraphModel::nodes()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the routing graph. Immutable once the graph is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self { id, label: label.into() }
    }
}
