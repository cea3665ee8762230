//! Reverse-pair stripping.
//!
//! An active pair `u→v`, `v→u` leaves both endpoints' net flow untouched but
//! still pays two edge costs. Descent cannot remove it one flip at a time
//! (each single flip breaks conservation at two nodes), so it is cut here.

use crate::model::{BitVector, GraphModel};

#[derive(Debug, Clone, PartialEq)]
pub struct StripOutcome {
    pub bits: BitVector,
    pub removed_pairs: usize,
}

/// Deactivate every mutually active reverse edge pair. One pass suffices:
/// clearing bits never creates a new pair.
pub fn strip(graph: &GraphModel, bits: BitVector) -> StripOutcome {
    let mut bits = bits;
    let mut removed_pairs = 0;
    for var in 0..graph.num_vars() {
        if !bits.get(var) {
            continue;
        }
        if let Some(rev) = graph.reverse_of(var) {
            if bits.get(rev) {
                bits.set(var, false);
                bits.set(rev, false);
                removed_pairs += 1;
            }
        }
    }
    StripOutcome { bits, removed_pairs }
}
