//! # Restart Orchestration
//!
//! Drives every sample through the refinement pipeline:
//!
//! ```text
//! sample ─▶ multi_descent(k) ─▶ strip ─▶ multi_descent(k) ─▶ extract
//! ```
//!
//! Samples are independent. Each gets its own `StdRng` derived from the
//! master seed and its index, so the outcome of a run does not depend on how
//! rayon schedules the work. The best route is a reduction over the
//! per-sample outcomes (minimum cost, then lowest sample index).

pub mod report;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::config::SolverConfig;
use crate::model::{BitVector, GraphModel};
use crate::qubo::QuboMatrix;
use crate::refine::{extract, multi_descent, strip};
use crate::sampler::Sampler;
use crate::{Error, Result};

pub use report::{SampleOutcome, Solution, SolveReport};

/// Descent stages per sample (before and after cycle stripping).
const STAGES: usize = 2;

/// Seed for the generator of sample `index`.
fn sample_seed(master: u64, index: usize) -> u64 {
    master.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ index as u64
}

/// Runs the refinement pipeline over a batch of samples.
pub struct RestartOrchestrator<'a> {
    graph: &'a GraphModel,
    matrix: &'a QuboMatrix,
    config: &'a SolverConfig,
}

impl<'a> RestartOrchestrator<'a> {
    pub fn new(graph: &'a GraphModel, matrix: &'a QuboMatrix, config: &'a SolverConfig) -> Self {
        Self { graph, matrix, config }
    }

    /// Descent passes spent on one sample.
    pub fn restarts_per_sample(&self) -> usize {
        STAGES * self.config.restarts_per_sample.max(1)
    }

    /// Refine one sample. Infeasibility is part of the outcome, not an error.
    pub fn refine_sample(&self, index: usize, sample: &BitVector) -> SampleOutcome {
        let mut rng = StdRng::seed_from_u64(sample_seed(self.config.seed, index));
        let k = self.config.restarts_per_sample;

        let first = multi_descent(self.matrix, sample, k, &mut rng);
        let stripped = strip(self.graph, first.bits);
        let second = multi_descent(self.matrix, &stripped.bits, k, &mut rng);
        let result = extract(self.graph, &second.bits);

        match &result {
            Ok(path) => tracing::debug!(index, cost = path.cost, "sample refined to a path"),
            Err(reason) => tracing::debug!(index, %reason, "sample infeasible after refinement"),
        }

        SampleOutcome {
            index,
            energy: second.energy,
            removed_pairs: stripped.removed_pairs,
            result,
        }
    }

    /// Refine every sample and keep the cheapest feasible route.
    pub fn run(&self, samples: &[BitVector]) -> Result<SolveReport> {
        for sample in samples {
            self.matrix.check_len(sample)?;
        }

        let outcomes: Vec<SampleOutcome> = if self.config.parallel {
            samples
                .par_iter()
                .enumerate()
                .map(|(i, s)| self.refine_sample(i, s))
                .collect()
        } else {
            samples
                .iter()
                .enumerate()
                .map(|(i, s)| self.refine_sample(i, s))
                .collect()
        };

        let per_sample = self.restarts_per_sample();
        let restarts = per_sample * samples.len();
        let feasible = outcomes.iter().filter(|o| o.is_feasible()).count();

        let best = outcomes
            .iter()
            .filter_map(|o| o.path().map(|p| (o, p)))
            .min_by(|(a, pa), (b, pb)| pa.cost.total_cmp(&pb.cost).then(a.index.cmp(&b.index)))
            .map(|(o, p)| Solution {
                path: p.clone(),
                cost: p.cost,
                energy: o.energy,
                sample_index: o.index,
                samples_consumed: o.index + 1,
                restarts_consumed: (o.index + 1) * per_sample,
            });

        let Some(best) = best else {
            tracing::warn!(samples = samples.len(), restarts, "no sample refined to a feasible path");
            return Err(Error::NoFeasiblePath { samples: samples.len(), restarts });
        };

        tracing::info!(
            samples = samples.len(),
            feasible,
            cost = best.cost,
            found_at = best.sample_index,
            "solve finished"
        );

        Ok(SolveReport { best, outcomes, samples: samples.len(), restarts, feasible })
    }
}

/// Draw `config.samples` vectors from `sampler` and refine them.
pub fn solve<S: Sampler + ?Sized>(
    graph: &GraphModel,
    matrix: &QuboMatrix,
    sampler: &mut S,
    config: &SolverConfig,
) -> Result<SolveReport> {
    config.validate()?;
    let samples = sampler.draw(matrix, config.samples)?;
    RestartOrchestrator::new(graph, matrix, config).run(&samples)
}
