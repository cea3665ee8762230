//! # QUBO Encoding
//!
//! The routing problem as a quadratic form over the edge variables:
//!
//! ```text
//! energy(x) = xᵀ M x + offset
//!
//! M = diag(edge costs) + P · Σ_nodes (Σ_out x − Σ_in x − k_n)²   (expanded)
//! k_n = +1 at the source, −1 at the destination, 0 elsewhere
//! ```
//!
//! A feasible path pays exactly its cost; anything that breaks flow
//! conservation pays at least `P` on top. `M` is symmetric and immutable once
//! built, so it is shared by reference across all restart trials.

pub mod builder;
pub mod energy;

use serde::{Deserialize, Serialize};

use crate::model::{GraphModel, VarIndex};
use crate::{Error, Result};

pub use builder::{build, QuboBuilder};

// ============================================================================
// Penalty policy
// ============================================================================

/// How the constraint penalty `P` is chosen.
///
/// `P` must exceed the cost of every simple source → destination path, or the
/// matrix's global minimum may sit on an infeasible state. Both policies
/// enforce that at build time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "value", rename_all = "snake_case")]
pub enum Penalty {
    /// Use exactly this value; rejected if it does not exceed the bound.
    Fixed(f64),
    /// Maximum simple path cost plus this margin.
    Margin(f64),
}

impl Default for Penalty {
    fn default() -> Self {
        Penalty::Fixed(15.0)
    }
}

impl Penalty {
    /// Resolve the policy to a concrete `P` for `graph`.
    pub fn resolve(self, graph: &GraphModel) -> Result<f64> {
        let bound = graph.max_simple_path_cost().unwrap_or(0.0);
        match self {
            Penalty::Fixed(p) => {
                if !(p.is_finite() && p > 0.0) {
                    return Err(Error::InvalidPenalty(p));
                }
                if p <= bound {
                    return Err(Error::PenaltyTooSmall { penalty: p, bound });
                }
                Ok(p)
            }
            Penalty::Margin(m) => {
                if !(m.is_finite() && m > 0.0) {
                    return Err(Error::InvalidPenalty(m));
                }
                Ok(bound + m)
            }
        }
    }
}

// ============================================================================
// QuboMatrix
// ============================================================================

/// Dense symmetric `E × E` matrix plus scalar offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuboMatrix {
    dim: usize,
    /// Row-major, `dim * dim` entries.
    entries: Vec<f64>,
    offset: f64,
    penalty: f64,
}

impl QuboMatrix {
    pub(crate) fn zeros(dim: usize, penalty: f64) -> Self {
        Self { dim, entries: vec![0.0; dim * dim], offset: 0.0, penalty }
    }

    /// Number of variables E.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, i: VarIndex, j: VarIndex) -> f64 {
        self.entries[i * self.dim + j]
    }

    pub fn row(&self, i: VarIndex) -> &[f64] {
        &self.entries[i * self.dim..(i + 1) * self.dim]
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The penalty `P` the matrix was built with.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.dim).all(|i| (i + 1..self.dim).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }

    /// Add a coefficient of `xᵢxⱼ` to the form. Off-diagonal values are split
    /// evenly between `(i, j)` and `(j, i)`.
    pub(crate) fn add_term(&mut self, i: VarIndex, j: VarIndex, value: f64) {
        if i == j {
            self.entries[i * self.dim + i] += value;
        } else {
            self.entries[i * self.dim + j] += value / 2.0;
            self.entries[j * self.dim + i] += value / 2.0;
        }
    }

    pub(crate) fn add_offset(&mut self, value: f64) {
        self.offset += value;
    }
}
