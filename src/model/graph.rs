//! GraphModel — nodes, directed edges, and the edge → variable bijection.
//!
//! Built once from a list of labels and undirected ducts. Every duct
//! contributes two directed edges in duct order (forward, then backward), so
//! the variable index of an edge is stable for the lifetime of the model and
//! of every matrix built from it.

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::{BitVector, DirectedEdge, Duct, Node, NodeId, VarIndex};
use crate::{Error, Result};

type EdgeList = SmallVec<[VarIndex; 4]>;

/// Immutable routing graph with a designated source and destination.
#[derive(Debug, Clone)]
pub struct GraphModel {
    nodes: Vec<Node>,
    by_label: HashMap<String, NodeId>,
    edges: Vec<DirectedEdge>,
    by_endpoints: HashMap<(NodeId, NodeId), VarIndex>,
    outgoing: Vec<EdgeList>,
    incoming: Vec<EdgeList>,
    source: NodeId,
    destination: NodeId,
}

impl GraphModel {
    /// Build a graph from node labels and undirected ducts.
    ///
    /// Fails on duplicate or empty labels, unknown endpoints, self-loops,
    /// duplicate ducts, non-positive or non-finite costs, and when source
    /// and destination coincide.
    pub fn new<L, I>(labels: I, ducts: &[Duct], source: &str, destination: &str) -> Result<Self>
    where
        L: Into<String>,
        I: IntoIterator<Item = L>,
    {
        let mut nodes = Vec::new();
        let mut by_label = HashMap::new();
        for label in labels {
            let label: String = label.into();
            if label.is_empty() {
                return Err(Error::InvalidGraph("empty node label".into()));
            }
            let id = NodeId(nodes.len() as u32);
            if by_label.insert(label.clone(), id).is_some() {
                return Err(Error::InvalidGraph(format!("duplicate node label '{label}'")));
            }
            nodes.push(Node::new(id, label));
        }

        let lookup = |label: &str| -> Result<NodeId> {
            by_label.get(label).copied().ok_or_else(|| Error::UnknownNode(label.to_string()))
        };
        let source = lookup(source)?;
        let destination = lookup(destination)?;
        if source == destination {
            return Err(Error::InvalidGraph("source and destination must differ".into()));
        }

        let mut edges = Vec::with_capacity(ducts.len() * 2);
        let mut by_endpoints = HashMap::with_capacity(ducts.len() * 2);
        let mut outgoing = vec![EdgeList::new(); nodes.len()];
        let mut incoming = vec![EdgeList::new(); nodes.len()];

        for duct in ducts {
            let u = lookup(&duct.u)?;
            let v = lookup(&duct.v)?;
            if u == v {
                return Err(Error::InvalidGraph(format!("self-loop on '{}'", duct.u)));
            }
            if !(duct.cost.is_finite() && duct.cost > 0.0) {
                return Err(Error::InvalidGraph(format!(
                    "duct {}-{} has non-positive cost {}", duct.u, duct.v, duct.cost
                )));
            }
            for (src, dst) in [(u, v), (v, u)] {
                let var = edges.len();
                if by_endpoints.insert((src, dst), var).is_some() {
                    return Err(Error::InvalidGraph(format!(
                        "duplicate duct {}-{}", duct.u, duct.v
                    )));
                }
                edges.push(DirectedEdge::new(var, src, dst, duct.cost));
                outgoing[src.index()].push(var);
                incoming[dst.index()].push(var);
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "graph model built"
        );

        Ok(Self { nodes, by_label, edges, by_endpoints, outgoing, incoming, source, destination })
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Number of QUBO variables, E = 2 × ducts.
    pub fn num_vars(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    pub fn edge(&self, var: VarIndex) -> &DirectedEdge {
        &self.edges[var]
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].label
    }

    /// Variable index of the directed edge `src → dst`, if it exists.
    pub fn var_between(&self, src: NodeId, dst: NodeId) -> Option<VarIndex> {
        self.by_endpoints.get(&(src, dst)).copied()
    }

    /// Variable index of the directed edge between two labels.
    pub fn var_by_labels(&self, src: &str, dst: &str) -> Option<VarIndex> {
        self.var_between(self.node_id(src)?, self.node_id(dst)?)
    }

    /// The opposite direction of the same duct.
    pub fn reverse_of(&self, var: VarIndex) -> Option<VarIndex> {
        let e = &self.edges[var];
        self.var_between(e.dst, e.src)
    }

    pub fn outgoing(&self, id: NodeId) -> &[VarIndex] {
        &self.outgoing[id.index()]
    }

    pub fn incoming(&self, id: NodeId) -> &[VarIndex] {
        &self.incoming[id.index()]
    }

    // ========================================================================
    // Flow conservation
    // ========================================================================

    /// Required net outflow: +1 at the source, −1 at the destination, 0 elsewhere.
    pub fn target_outflow(&self, id: NodeId) -> i32 {
        if id == self.source { 1 }
        else if id == self.destination { -1 }
        else { 0 }
    }

    /// Active outgoing minus active incoming edges at `id`.
    pub fn net_outflow(&self, bits: &BitVector, id: NodeId) -> i32 {
        let out = self.outgoing(id).iter().filter(|&&e| bits.get(e)).count() as i32;
        let inn = self.incoming(id).iter().filter(|&&e| bits.get(e)).count() as i32;
        out - inn
    }

    /// True if every node's net outflow matches its target.
    pub fn conservation_holds(&self, bits: &BitVector) -> bool {
        self.nodes.iter().all(|n| self.net_outflow(bits, n.id) == self.target_outflow(n.id))
    }

    // ========================================================================
    // Path enumeration
    // ========================================================================

    /// Sum of the costs of the given edges.
    pub fn path_cost(&self, edges: &[VarIndex]) -> f64 {
        edges.iter().map(|&e| self.edges[e].cost).sum()
    }

    /// Every simple source → destination path, as edge index sequences.
    ///
    /// Depth-first and exponential in the worst case; intended for the small
    /// graphs this crate targets (penalty bounds and test oracles).
    pub fn simple_paths(&self) -> Vec<Vec<VarIndex>> {
        let mut out = Vec::new();
        let mut visited = vec![false; self.nodes.len()];
        let mut trail = Vec::new();
        visited[self.source.index()] = true;
        self.walk_simple(self.source, &mut visited, &mut trail, &mut out);
        out
    }

    fn walk_simple(
        &self,
        at: NodeId,
        visited: &mut [bool],
        trail: &mut Vec<VarIndex>,
        out: &mut Vec<Vec<VarIndex>>,
    ) {
        if at == self.destination {
            out.push(trail.clone());
            return;
        }
        for &e in self.outgoing(at) {
            let next = self.edges[e].dst;
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            trail.push(e);
            self.walk_simple(next, visited, trail, out);
            trail.pop();
            visited[next.index()] = false;
        }
    }

    /// Cost of the most expensive simple source → destination path, or
    /// `None` if the destination is unreachable.
    pub fn max_simple_path_cost(&self) -> Option<f64> {
        self.simple_paths()
            .iter()
            .map(|p| self.path_cost(p))
            .reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphModel {
        let ducts = [Duct::new("S", "M", 1.0), Duct::new("M", "T", 2.0), Duct::new("S", "T", 4.0)];
        GraphModel::new(["S", "M", "T"], &ducts, "S", "T").unwrap()
    }

    #[test]
    fn test_variable_order_is_forward_then_backward() {
        let g = triangle();
        assert_eq!(g.num_vars(), 6);
        assert_eq!(g.var_by_labels("S", "M"), Some(0));
        assert_eq!(g.var_by_labels("M", "S"), Some(1));
        assert_eq!(g.var_by_labels("S", "T"), Some(4));
        assert_eq!(g.reverse_of(4), Some(5));
        assert!(g.edge(2).is_reverse_of(g.edge(3)));
    }

    #[test]
    fn test_simple_paths_and_bound() {
        let g = triangle();
        let mut costs: Vec<f64> = g.simple_paths().iter().map(|p| g.path_cost(p)).collect();
        costs.sort_by(f64::total_cmp);
        assert_eq!(costs, vec![3.0, 4.0]);
        assert_eq!(g.max_simple_path_cost(), Some(4.0));
    }

    #[test]
    fn test_net_outflow() {
        let g = triangle();
        let s = g.node_id("S").unwrap();
        let m = g.node_id("M").unwrap();
        let bits = BitVector::from_active(6, [0, 2]);
        assert_eq!(g.net_outflow(&bits, s), 1);
        assert_eq!(g.net_outflow(&bits, m), 0);
        assert!(g.conservation_holds(&bits));
        assert!(!g.conservation_holds(&BitVector::from_active(6, [0])));
    }

    #[test]
    fn test_rejects_bad_input() {
        let dup = GraphModel::new(["A", "A"], &[], "A", "A");
        assert!(matches!(dup, Err(Error::InvalidGraph(_))));

        let unknown = GraphModel::new(["A", "B"], &[Duct::new("A", "Z", 1.0)], "A", "B");
        assert!(matches!(unknown, Err(Error::UnknownNode(ref l)) if l == "Z"));

        let loop_ = GraphModel::new(["A", "B"], &[Duct::new("A", "A", 1.0)], "A", "B");
        assert!(matches!(loop_, Err(Error::InvalidGraph(_))));

        let free = GraphModel::new(["A", "B"], &[Duct::new("A", "B", 0.0)], "A", "B");
        assert!(matches!(free, Err(Error::InvalidGraph(_))));

        let twice = GraphModel::new(
            ["A", "B"],
            &[Duct::new("A", "B", 1.0), Duct::new("B", "A", 2.0)],
            "A",
            "B",
        );
        assert!(matches!(twice, Err(Error::InvalidGraph(_))));

        let same = GraphModel::new(["A", "B"], &[], "A", "A");
        assert!(matches!(same, Err(Error::InvalidGraph(_))));
    }

    #[test]
    fn test_unreachable_destination_has_no_bound() {
        let g = GraphModel::new(["A", "B", "C"], &[Duct::new("A", "B", 1.0)], "A", "C").unwrap();
        assert!(g.simple_paths().is_empty());
        assert_eq!(g.max_simple_path_cost(), None);
    }
}
