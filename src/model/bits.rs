//! BitVector — a total 0/1 assignment over the edge variables.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::VarIndex;
use crate::{Error, Result};

/// Widest vector an integer-encoded state can describe.
pub const MAX_STATE_BITS: usize = u64::BITS as usize;

/// One bit per `VarIndex`. Bit `i` set means directed edge `i` is active.
///
/// Inline storage covers graphs up to 32 directed edges without allocating,
/// which keeps per-trial copies cheap inside the restart loops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitVector {
    bits: SmallVec<[bool; 32]>,
}

impl BitVector {
    /// All-zero vector of length `len`.
    pub fn zeros(len: usize) -> Self {
        Self { bits: SmallVec::from_elem(false, len) }
    }

    /// Vector of length `len` with exactly the listed indices set.
    ///
    /// Indices outside `0..len` are ignored.
    pub fn from_active(len: usize, active: impl IntoIterator<Item = VarIndex>) -> Self {
        let mut v = Self::zeros(len);
        for i in active {
            if i < len {
                v.bits[i] = true;
            }
        }
        v
    }

    /// Decode an integer-encoded state with MSB-first ordering: variable 0
    /// is the most significant of the `len` low bits. This is how circuit
    /// samplers report measured basis states.
    ///
    /// Fails if `len` exceeds the 64 bits a `u64` state can carry.
    pub fn from_state_msb(state: u64, len: usize) -> Result<Self> {
        if len > MAX_STATE_BITS {
            return Err(Error::TooManyVariables { got: len, max: MAX_STATE_BITS });
        }
        Ok(Self::decode_msb(state, len))
    }

    /// `from_state_msb` for callers that have already bounded `len`.
    pub(crate) fn decode_msb(state: u64, len: usize) -> Self {
        debug_assert!(len <= MAX_STATE_BITS);
        let bits = (0..len)
            .map(|i| (state >> (len - 1 - i)) & 1 == 1)
            .collect();
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn get(&self, i: VarIndex) -> bool {
        self.bits[i]
    }

    #[inline]
    pub fn set(&mut self, i: VarIndex, value: bool) {
        self.bits[i] = value;
    }

    #[inline]
    pub fn flip(&mut self, i: VarIndex) {
        self.bits[i] = !self.bits[i];
    }

    /// Copy of `self` with bit `i` flipped.
    pub fn flipped(&self, i: VarIndex) -> Self {
        let mut out = self.clone();
        out.flip(i);
        out
    }

    /// The active edge set: indices whose bit is 1, ascending.
    pub fn active(&self) -> impl Iterator<Item = VarIndex> + '_ {
        self.bits.iter().enumerate().filter_map(|(i, &b)| b.then_some(i))
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for BitVector {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits: SmallVec::from_vec(bits) }
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}

impl std::fmt::Display for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}
