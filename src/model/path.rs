//! Path — an ordered, simple source → destination route.

use serde::{Deserialize, Serialize};
use super::{GraphModel, NodeId, VarIndex};

/// A simple directed path recovered from an active edge set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Nodes along the path. Always has one more element than `edges`.
    pub nodes: Vec<NodeId>,
    /// Variable indices of the directed edges traversed, in order.
    pub edges: Vec<VarIndex>,
    /// Sum of the traversed edge costs.
    pub cost: f64,
}

impl Path {
    pub fn single(node: NodeId) -> Self {
        Self { nodes: vec![node], edges: Vec::new(), cost: 0.0 }
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Extend the path with a directed edge and its target node.
    pub fn append(&mut self, edge: VarIndex, node: NodeId, cost: f64) {
        self.edges.push(edge);
        self.nodes.push(node);
        self.cost += cost;
    }

    /// Node labels in order.
    pub fn labels<'g>(&self, graph: &'g GraphModel) -> Vec<&'g str> {
        self.nodes.iter().map(|&n| graph.label(n)).collect()
    }

    /// Human-readable route, e.g. `A -> D -> F`.
    pub fn render(&self, graph: &GraphModel) -> String {
        self.labels(graph).join(" -> ")
    }
}
