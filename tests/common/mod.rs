//! Shared fixtures for the end-to-end tests.

#![allow(dead_code)]

use qubo_route::{BitVector, Duct, GraphModel, Penalty, Router};

/// Six nodes, eight ducts, 16 edge variables. Route A → F.
pub fn duct_network() -> GraphModel {
    let ducts = [
        Duct::new("A", "B", 1.5),
        Duct::new("A", "D", 1.8),
        Duct::new("B", "C", 1.6),
        Duct::new("B", "E", 2.2),
        Duct::new("C", "F", 2.0),
        Duct::new("D", "E", 1.9),
        Duct::new("D", "F", 2.5),
        Duct::new("E", "F", 3.0),
    ];
    GraphModel::new(["A", "B", "C", "D", "E", "F"], &ducts, "A", "F").unwrap()
}

/// The duct network with P = 15.
pub fn router() -> Router {
    Router::new(duct_network(), Penalty::Fixed(15.0)).unwrap()
}

/// Vector with the named directed edges active.
pub fn bits_of(graph: &GraphModel, edges: &[(&str, &str)]) -> BitVector {
    let active = edges
        .iter()
        .map(|(u, v)| graph.var_by_labels(u, v).unwrap());
    BitVector::from_active(graph.num_vars(), active)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
