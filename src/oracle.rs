//! Exhaustive enumeration over all 2^E bit vectors.
//!
//! Ground truth for tests and small instances. Enumeration is split across
//! the rayon pool with a fold/reduce; every worker keeps its own incumbent.

use rayon::prelude::*;

use crate::model::BitVector;
use crate::qubo::QuboMatrix;
use crate::refine::IMPROVEMENT_TOL;
use crate::{Error, Result};

/// Largest variable count the oracle accepts (16M states).
pub const MAX_ORACLE_VARS: usize = 24;

/// Global minimum energy and every vector attaining it (within tolerance).
#[derive(Debug, Clone, PartialEq)]
pub struct OracleResult {
    pub energy: f64,
    /// Co-optimal vectors in ascending MSB-first state order.
    pub solutions: Vec<BitVector>,
}

#[derive(Debug, Clone)]
struct Incumbent {
    energy: f64,
    states: Vec<u64>,
}

impl Incumbent {
    fn empty() -> Self {
        Self { energy: f64::INFINITY, states: Vec::new() }
    }

    fn offer(mut self, energy: f64, state: u64) -> Self {
        if energy < self.energy - IMPROVEMENT_TOL {
            self.energy = energy;
            self.states.clear();
            self.states.push(state);
        } else if (energy - self.energy).abs() <= IMPROVEMENT_TOL {
            self.states.push(state);
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        if other.energy < self.energy - IMPROVEMENT_TOL {
            other
        } else if self.energy < other.energy - IMPROVEMENT_TOL {
            self
        } else {
            let mut states = self.states;
            states.extend(other.states);
            Self { energy: self.energy.min(other.energy), states }
        }
    }
}

/// Evaluate every assignment and return the minimum.
pub fn brute_force(matrix: &QuboMatrix) -> Result<OracleResult> {
    let n = matrix.dim();
    if n > MAX_ORACLE_VARS {
        return Err(Error::TooManyVariables { got: n, max: MAX_ORACLE_VARS });
    }

    let best = (0..1u64 << n)
        .into_par_iter()
        .fold(Incumbent::empty, |acc, state| {
            let x = BitVector::decode_msb(state, n);
            let e = matrix.energy(&x);
            acc.offer(e, state)
        })
        .reduce(Incumbent::empty, Incumbent::merge);

    let mut states = best.states;
    states.sort_unstable();
    tracing::info!(
        vars = n,
        energy = best.energy,
        optima = states.len(),
        "exhaustive search finished"
    );

    Ok(OracleResult {
        energy: best.energy,
        solutions: states.into_iter().map(|s| BitVector::decode_msb(s, n)).collect(),
    })
}
