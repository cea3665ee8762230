//! Configuration: graph description and solver knobs, loadable from JSON.

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::model::{Duct, GraphModel};
use crate::qubo::Penalty;
use crate::{Error, Result};

// ============================================================================
// Graph description
// ============================================================================

/// Graph as supplied on disk:
///
/// ```json
/// { "nodes": ["A", "B"], "edges": [{ "u": "A", "v": "B", "cost": 1.5 }] }
/// ```
///
/// Source and destination are chosen per query, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<String>,
    pub edges: Vec<Duct>,
}

impl GraphSpec {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<FsPath>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build the routing model for one source/destination pair.
    pub fn to_model(&self, source: &str, destination: &str) -> Result<GraphModel> {
        GraphModel::new(self.nodes.iter().cloned(), &self.edges, source, destination)
    }
}

// ============================================================================
// Solver configuration
// ============================================================================

/// Knobs for a full solve run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Constraint penalty policy.
    pub penalty: Penalty,
    /// Descent trials per multi-descent stage (one best-first, rest randomized).
    pub restarts_per_sample: usize,
    /// Candidate vectors drawn from the sampler.
    pub samples: usize,
    /// Master seed; per-sample generators derive from it and the sample index.
    pub seed: u64,
    /// Process samples on the rayon pool.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            penalty: Penalty::default(),
            restarts_per_sample: 20,
            samples: 200,
            seed: 0,
            parallel: true,
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.restarts_per_sample == 0 {
            return Err(Error::Config("restarts_per_sample must be at least 1".into()));
        }
        if self.samples == 0 {
            return Err(Error::Config("samples must be at least 1".into()));
        }
        Ok(())
    }
}

/// Simulated-annealing schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    pub temp_max: f64,
    pub temp_min: f64,
    /// Metropolis steps per chain.
    pub steps: usize,
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self { temp_max: 100.0, temp_min: 0.001, steps: 20_000, seed: 42 }
    }
}

impl AnnealingConfig {
    pub fn validate(&self) -> Result<()> {
        let temps_ok = self.temp_min.is_finite()
            && self.temp_max.is_finite()
            && self.temp_min > 0.0
            && self.temp_max >= self.temp_min;
        if !temps_ok {
            return Err(Error::Config(format!(
                "annealing temperatures must satisfy 0 < temp_min <= temp_max, got {}..{}",
                self.temp_min, self.temp_max
            )));
        }
        if self.steps == 0 {
            return Err(Error::Config("annealing steps must be at least 1".into()));
        }
        Ok(())
    }
}
