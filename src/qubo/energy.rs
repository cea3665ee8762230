//! Energy evaluation: full `xᵀMx + offset` and O(E) single-flip deltas.

use smallvec::SmallVec;

use super::QuboMatrix;
use crate::model::{BitVector, VarIndex};
use crate::{Error, Result};

impl QuboMatrix {
    /// Reject bit vectors that do not cover exactly `dim()` variables.
    pub fn check_len(&self, x: &BitVector) -> Result<()> {
        if x.len() != self.dim() {
            return Err(Error::DimensionMismatch { expected: self.dim(), got: x.len() });
        }
        Ok(())
    }

    /// `xᵀMx + offset`. Only active pairs contribute.
    pub fn energy(&self, x: &BitVector) -> f64 {
        debug_assert_eq!(x.len(), self.dim());
        let active: SmallVec<[VarIndex; 32]> = x.active().collect();
        let mut e = self.offset();
        for &i in &active {
            let row = self.row(i);
            for &j in &active {
                e += row[j];
            }
        }
        e
    }

    /// Energy change from flipping bit `i`, without a full re-evaluation:
    ///
    /// ```text
    /// Δ = (1 − 2xᵢ) · (Mᵢᵢ + 2 Σ_{j≠i} Mᵢⱼ xⱼ)
    /// ```
    pub fn delta(&self, x: &BitVector, i: VarIndex) -> f64 {
        debug_assert_eq!(x.len(), self.dim());
        let row = self.row(i);
        let coupling: f64 = x.active().filter(|&j| j != i).map(|j| row[j]).sum();
        let sign = if x.get(i) { -1.0 } else { 1.0 };
        sign * (row[i] + 2.0 * coupling)
    }

    /// Every bit whose flip lowers the energy by more than `tol`, with its delta.
    pub fn improving_flips(&self, x: &BitVector, tol: f64) -> SmallVec<[(VarIndex, f64); 32]> {
        (0..self.dim())
            .filter_map(|i| {
                let d = self.delta(x, i);
                (d < -tol).then_some((i, d))
            })
            .collect()
    }
}
