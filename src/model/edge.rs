//! Directed edge (one direction of a duct) in the routing graph.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// Position of a directed edge in the QUBO variable space, `0..E`.
pub type VarIndex = usize;

/// A directed edge. Every undirected duct yields two of these, one per
/// direction, each owning its own binary variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectedEdge {
    pub var: VarIndex,
    pub src: NodeId,
    pub dst: NodeId,
    pub cost: f64,
}

impl DirectedEdge {
    pub fn new(var: VarIndex, src: NodeId, dst: NodeId, cost: f64) -> Self {
        Self { var, src, dst, cost }
    }

    /// True if `other` runs between the same endpoints in the opposite direction.
    pub fn is_reverse_of(&self, other: &DirectedEdge) -> bool {
        self.src == other.dst && self.dst == other.src
    }
}

/// An undirected duct as supplied by the caller: two labels and a cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duct {
    pub u: String,
    pub v: String,
    pub cost: f64,
}

impl Duct {
    pub fn new(u: impl Into<String>, v: impl Into<String>, cost: f64) -> Self {
        Self { u: u.into(), v: v.into(), cost }
    }
}
