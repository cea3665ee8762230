//! Path extraction: turn an active edge set into an ordered route, or say why
//! it is not one.

use serde::{Deserialize, Serialize};

use crate::model::{BitVector, GraphModel, NodeId, Path};

/// Why an active edge set is not a single simple source → destination path.
///
/// This is an expected outcome of refinement, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Infeasible {
    /// No edge is active.
    Empty,
    /// Net outflow at `node` is `net` instead of `expected`.
    Conservation { node: NodeId, net: i32, expected: i32 },
    /// More than one active outgoing edge on the route.
    Branch { node: NodeId },
    /// Active edges left over outside the route (disjoint cycles).
    Detached { edges: usize },
}

impl std::fmt::Display for Infeasible {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Infeasible::Empty => write!(f, "no active edges"),
            Infeasible::Conservation { node, net, expected } => {
                write!(f, "flow conservation violated at node {node}: net {net}, expected {expected}")
            }
            Infeasible::Branch { node } => write!(f, "route branches at node {node}"),
            Infeasible::Detached { edges } => write!(f, "{edges} active edges outside the route"),
        }
    }
}

/// Outcome of `extract`.
pub type Extraction = std::result::Result<Path, Infeasible>;

/// Validate `bits` and reconstruct the path it encodes.
pub fn extract(graph: &GraphModel, bits: &BitVector) -> Extraction {
    let active = bits.count_ones();
    if active == 0 {
        return Err(Infeasible::Empty);
    }

    for node in graph.nodes() {
        let net = graph.net_outflow(bits, node.id);
        let expected = graph.target_outflow(node.id);
        if net != expected {
            return Err(Infeasible::Conservation { node: node.id, net, expected });
        }
    }

    // Under conservation every node the walk enters has an active outgoing
    // edge, and a node entered twice would need a second outgoing edge
    // (reported as a branch). The walk reaches the destination within one
    // hop per node.
    let mut at = graph.source();
    let mut path = Path::single(at);
    while at != graph.destination() && path.len() < graph.nodes().len() {
        let mut out = graph.outgoing(at).iter().copied().filter(|&e| bits.get(e));
        let Some(var) = out.next() else { break };
        if out.next().is_some() {
            return Err(Infeasible::Branch { node: at });
        }
        let edge = graph.edge(var);
        path.append(var, edge.dst, edge.cost);
        at = edge.dst;
    }
    debug_assert_eq!(at, graph.destination());

    if active > path.len() {
        return Err(Infeasible::Detached { edges: active - path.len() });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Duct;
    use pretty_assertions::assert_eq;

    fn diamond() -> GraphModel {
        let ducts = [
            Duct::new("S", "L", 1.0),
            Duct::new("S", "R", 2.0),
            Duct::new("L", "T", 1.0),
            Duct::new("R", "T", 1.0),
            Duct::new("L", "R", 0.5),
        ];
        GraphModel::new(["S", "L", "R", "T"], &ducts, "S", "T").unwrap()
    }

    fn bits(g: &GraphModel, hops: &[(&str, &str)]) -> BitVector {
        BitVector::from_active(
            g.num_vars(),
            hops.iter().map(|(u, v)| g.var_by_labels(u, v).unwrap()),
        )
    }

    #[test]
    fn test_extracts_ordered_path() {
        let g = diamond();
        let path = extract(&g, &bits(&g, &[("L", "R"), ("S", "L"), ("R", "T")])).unwrap();
        assert_eq!(path.labels(&g), vec!["S", "L", "R", "T"]);
        assert_eq!(path.render(&g), "S -> L -> R -> T");
        assert!((path.cost - 2.5).abs() < 1e-12);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_reports_conservation_failure() {
        let g = diamond();
        let err = extract(&g, &bits(&g, &[("S", "L")])).unwrap_err();
        assert!(matches!(err, Infeasible::Conservation { .. }));
        assert_eq!(extract(&g, &BitVector::zeros(g.num_vars())), Err(Infeasible::Empty));
    }

    #[test]
    fn test_reports_branch_on_shared_cycle() {
        let g = diamond();
        // S→R→T plus the directed cycle L→T→R→L through the same two nodes.
        let x = bits(&g, &[("S", "R"), ("R", "T"), ("L", "T"), ("T", "R"), ("R", "L")]);
        assert!(g.conservation_holds(&x));
        let r = g.node_id("R").unwrap();
        assert_eq!(extract(&g, &x), Err(Infeasible::Branch { node: r }));
    }

    #[test]
    fn test_reports_branch_at_source() {
        let g = diamond();
        // Source emits two routes and takes one back: net outflow still +1.
        let x = bits(&g, &[("S", "L"), ("S", "R"), ("L", "S"), ("R", "T")]);
        assert!(g.conservation_holds(&x));
        assert_eq!(extract(&g, &x), Err(Infeasible::Branch { node: g.source() }));
    }

    #[test]
    fn test_conserving_states_are_paths_branches_or_detached() {
        let g = diamond();
        let n = g.num_vars();
        let mut simple: Vec<Vec<usize>> = g.simple_paths();
        simple.sort();
        let mut found = Vec::new();

        for state in 0..(1u64 << n) {
            let x = BitVector::from_state_msb(state, n).unwrap();
            match extract(&g, &x) {
                Ok(path) => {
                    assert_eq!(path.end(), g.destination());
                    let mut nodes = path.nodes.clone();
                    nodes.sort();
                    nodes.dedup();
                    assert_eq!(nodes.len(), path.nodes.len(), "route repeats a node");
                    found.push(path.edges);
                }
                Err(Infeasible::Conservation { .. }) => assert!(!g.conservation_holds(&x)),
                Err(Infeasible::Empty) => assert_eq!(x.count_ones(), 0),
                Err(Infeasible::Branch { .. } | Infeasible::Detached { .. }) => {
                    assert!(g.conservation_holds(&x));
                }
            }
        }

        found.sort();
        assert_eq!(found, simple);
    }

    #[test]
    fn test_reports_detached_pair() {
        let g = diamond();
        let x = bits(&g, &[("S", "R"), ("R", "T"), ("L", "T"), ("T", "L")]);
        assert_eq!(extract(&g, &x), Err(Infeasible::Detached { edges: 2 }));
    }
}
