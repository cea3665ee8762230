//! Result reporting for a solve run.

use serde::Serialize;

use crate::model::Path;
use crate::refine::Extraction;

/// What the pipeline made of one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleOutcome {
    /// Position of the sample in the drawn batch.
    pub index: usize,
    /// Energy of the refined vector.
    pub energy: f64,
    /// Reverse pairs cut between the two descent stages.
    pub removed_pairs: usize,
    pub result: Extraction,
}

impl SampleOutcome {
    pub fn path(&self) -> Option<&Path> {
        self.result.as_ref().ok()
    }

    pub fn is_feasible(&self) -> bool {
        self.result.is_ok()
    }
}

/// The best feasible route of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub path: Path,
    pub cost: f64,
    pub energy: f64,
    /// Index of the sample that produced it.
    pub sample_index: usize,
    /// Samples processed up to and including that one.
    pub samples_consumed: usize,
    /// Descent passes spent up to and including that sample.
    pub restarts_consumed: usize,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    pub best: Solution,
    /// One entry per sample, in sample order.
    pub outcomes: Vec<SampleOutcome>,
    pub samples: usize,
    /// Total descent passes across the run.
    pub restarts: usize,
    /// Samples that refined to a feasible path.
    pub feasible: usize,
}

impl SolveReport {
    pub fn feasible_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.feasible as f64 / self.samples as f64
        }
    }
}
