//! # Sampler Boundary
//!
//! Samplers produce candidate bit vectors; the refinement pipeline decides
//! what they are worth. Nothing a sampler returns is trusted: every vector is
//! length-checked and repaired before it can become a result.
//!
//! | Sampler | Module | Description |
//! |---------|--------|-------------|
//! | `UniformSampler` | `uniform` | Independent fair coin per variable |
//! | `AnnealingSampler` | `annealing` | Metropolis spin search, final state per chain |
//! | `FixedSamples` | here | Pre-recorded shots, e.g. circuit measurements |

pub mod uniform;
pub mod annealing;

use std::collections::VecDeque;

use crate::model::BitVector;
use crate::qubo::QuboMatrix;
use crate::Result;

pub use uniform::UniformSampler;
pub use annealing::AnnealingSampler;

/// The producer side of the pipeline.
///
/// Implementations may be stateful (an RNG, a cursor into recorded shots);
/// the orchestrator draws once, sequentially, and then fans the samples out.
pub trait Sampler {
    /// Up to `count` candidate vectors for `matrix`. Returning fewer is
    /// allowed (e.g. a recorded source running dry).
    fn draw(&mut self, matrix: &QuboMatrix, count: usize) -> Result<Vec<BitVector>>;
}

// ============================================================================
// FixedSamples
// ============================================================================

/// Replays vectors produced elsewhere, in order.
#[derive(Debug, Clone, Default)]
pub struct FixedSamples {
    queue: VecDeque<BitVector>,
}

impl FixedSamples {
    pub fn new(samples: impl IntoIterator<Item = BitVector>) -> Self {
        Self { queue: samples.into_iter().collect() }
    }

    /// Decode integer-encoded basis states (MSB-first) over `len` variables.
    /// Fails when `len` is wider than a `u64` state.
    pub fn from_states(states: impl IntoIterator<Item = u64>, len: usize) -> Result<Self> {
        let queue = states
            .into_iter()
            .map(|s| BitVector::from_state_msb(s, len))
            .collect::<Result<VecDeque<_>>>()?;
        Ok(Self { queue })
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Sampler for FixedSamples {
    fn draw(&mut self, _matrix: &QuboMatrix, count: usize) -> Result<Vec<BitVector>> {
        let take = count.min(self.queue.len());
        Ok(self.queue.drain(..take).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Duct, GraphModel};
    use crate::qubo::{build, Penalty};

    #[test]
    fn test_fixed_samples_drain_in_order() {
        let g = GraphModel::new(["A", "B"], &[Duct::new("A", "B", 1.0)], "A", "B").unwrap();
        let m = build(&g, Penalty::Fixed(5.0)).unwrap();
        let mut s = FixedSamples::from_states([0b10, 0b01, 0b11], 2).unwrap();
        let first = s.draw(&m, 2).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].to_string(), "10");
        assert_eq!(s.remaining(), 1);
        assert_eq!(s.draw(&m, 5).unwrap().len(), 1);
        assert!(s.draw(&m, 5).unwrap().is_empty());
    }

    #[test]
    fn test_states_wider_than_u64_are_rejected() {
        // 34-node chain: 33 ducts, 66 variables.
        let labels: Vec<String> = (0..34).map(|i| format!("N{i}")).collect();
        let ducts: Vec<Duct> = labels
            .windows(2)
            .map(|w| Duct::new(w[0].clone(), w[1].clone(), 1.0))
            .collect();
        let g = GraphModel::new(labels.iter().cloned(), &ducts, "N0", "N33").unwrap();
        assert_eq!(g.num_vars(), 66);

        let err = FixedSamples::from_states([1u64], g.num_vars()).unwrap_err();
        assert!(matches!(err, crate::Error::TooManyVariables { got: 66, max: 64 }));
    }
}
