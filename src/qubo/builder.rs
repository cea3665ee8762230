//! QUBO construction from a `GraphModel`.

use smallvec::SmallVec;

use super::{Penalty, QuboMatrix};
use crate::model::{GraphModel, VarIndex};
use crate::Result;

/// Builds the cost/penalty matrix for one graph.
pub struct QuboBuilder<'g> {
    graph: &'g GraphModel,
    penalty: Penalty,
}

impl<'g> QuboBuilder<'g> {
    pub fn new(graph: &'g GraphModel, penalty: Penalty) -> Self {
        Self { graph, penalty }
    }

    /// Emit `M` and the offset. Fails fast if the penalty does not exceed the
    /// graph's maximum simple path cost.
    pub fn build(&self) -> Result<QuboMatrix> {
        let graph = self.graph;
        let p = self.penalty.resolve(graph)?;
        let mut m = QuboMatrix::zeros(graph.num_vars(), p);

        for edge in graph.edges() {
            m.add_term(edge.var, edge.var, edge.cost);
        }

        // P · (Σ cᵢxᵢ − k)² with c = +1 on outgoing, −1 on incoming edges.
        // xᵢ² = xᵢ folds the squared terms and the linear cross term into the
        // diagonal; k² goes to the offset.
        for node in graph.nodes() {
            let k = graph.target_outflow(node.id) as f64;
            let terms: SmallVec<[(VarIndex, f64); 8]> = graph
                .outgoing(node.id)
                .iter()
                .map(|&e| (e, 1.0))
                .chain(graph.incoming(node.id).iter().map(|&e| (e, -1.0)))
                .collect();

            m.add_offset(p * k * k);
            for (a, &(i, ci)) in terms.iter().enumerate() {
                m.add_term(i, i, p * (ci * ci - 2.0 * k * ci));
                for &(j, cj) in &terms[a + 1..] {
                    m.add_term(i, j, 2.0 * p * ci * cj);
                }
            }
        }

        tracing::info!(
            dim = m.dim(),
            offset = m.offset(),
            penalty = p,
            "QUBO matrix built"
        );
        Ok(m)
    }
}

/// Shorthand for `QuboBuilder::new(graph, penalty).build()`.
pub fn build(graph: &GraphModel, penalty: Penalty) -> Result<QuboMatrix> {
    QuboBuilder::new(graph, penalty).build()
}
