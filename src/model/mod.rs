//! # Routing Model
//!
//! Plain data that every other component reads: the graph, its directed
//! edges, the bit vectors samplers produce, and the paths recovered from them.
//!
//! Design rule: no matrix math and no randomness here. This module is pure
//! data plus the flow-conservation bookkeeping the rest of the pipeline
//! relies on.

pub mod node;
pub mod edge;
pub mod graph;
pub mod bits;
pub mod path;

pub use node::{Node, NodeId};
pub use edge::{DirectedEdge, Duct, VarIndex};
pub use graph::GraphModel;
pub use bits::{BitVector, MAX_STATE_BITS};
pub use path::Path;
