//! Uniform random sampler: every variable an independent fair coin.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Sampler;
use crate::model::BitVector;
use crate::qubo::QuboMatrix;
use crate::Result;

/// Baseline producer with no knowledge of the energy landscape.
pub struct UniformSampler {
    rng: StdRng,
}

impl UniformSampler {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Sampler for UniformSampler {
    fn draw(&mut self, matrix: &QuboMatrix, count: usize) -> Result<Vec<BitVector>> {
        let n = matrix.dim();
        Ok((0..count)
            .map(|_| (0..n).map(|_| self.rng.gen_bool(0.5)).collect::<BitVector>())
            .collect())
    }
}
