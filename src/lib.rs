//! # qubo-route — Minimum-Cost Routing as a QUBO
//!
//! Encodes "cheapest simple path from source to destination" as a quadratic
//! unconstrained binary optimisation problem over one variable per directed
//! edge, and recovers valid routes from the noisy, frequently infeasible
//! vectors that samplers (annealers, variational circuits, random search)
//! return.
//!
//! ## Design Principles
//!
//! 1. **Samplers are untrusted**: every candidate goes through the refinement
//!    pipeline; no sampler decides what a valid answer is
//! 2. **Pure refinement**: descent, stripping and extraction are functions of
//!    their inputs plus an explicit seeded RNG
//! 3. **Fail fast on the penalty**: a penalty that cannot separate feasible
//!    from infeasible states is rejected when the matrix is built
//! 4. **Reduction, not shared state**: the best route is a fold over
//!    independent per-sample outcomes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qubo_route::{GraphSpec, Router, SolverConfig, UniformSampler};
//!
//! # fn example() -> qubo_route::Result<()> {
//! let spec = GraphSpec::from_path("graph.json")?;
//! let config = SolverConfig::default();
//! let router = Router::from_config(spec.to_model("A", "F")?, &config)?;
//!
//! let report = router.solve(&mut UniformSampler::new(7), &config)?;
//! println!("{} (cost {:.2})", report.best.path.render(router.graph()), report.best.cost);
//! # Ok(())
//! # }
//! ```
//!
//! ## Samplers
//!
//! | Sampler | Description |
//! |---------|-------------|
//! | `UniformSampler` | Independent fair coin per variable |
//! | `AnnealingSampler` | Metropolis spin search with geometric cooling |
//! | `FixedSamples` | Externally recorded shots (MSB-first integer states) |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod qubo;
pub mod refine;
pub mod sampler;
pub mod solve;
pub mod oracle;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    BitVector, DirectedEdge, Duct, GraphModel, Node, NodeId, Path, VarIndex, MAX_STATE_BITS,
};

// ============================================================================
// Re-exports: Encoding and refinement
// ============================================================================

pub use qubo::{Penalty, QuboBuilder, QuboMatrix};
pub use refine::{DescentMode, DescentOutcome, Extraction, Infeasible};

// ============================================================================
// Re-exports: Sampling, solving, configuration
// ============================================================================

pub use sampler::{AnnealingSampler, FixedSamples, Sampler, UniformSampler};
pub use solve::{RestartOrchestrator, SampleOutcome, Solution, SolveReport};
pub use oracle::OracleResult;
pub use config::{AnnealingConfig, GraphSpec, SolverConfig};

// ============================================================================
// Top-level Router handle
// ============================================================================

/// The primary entry point. A `Router` owns a graph and the matrix built
/// from it, and runs samplers' output through the refinement pipeline.
#[derive(Debug, Clone)]
pub struct Router {
    graph: GraphModel,
    matrix: QuboMatrix,
}

impl Router {
    /// Build the matrix for `graph`. Fails if the penalty does not exceed
    /// the most expensive simple path.
    pub fn new(graph: GraphModel, penalty: Penalty) -> Result<Self> {
        let matrix = qubo::build(&graph, penalty)?;
        Ok(Self { graph, matrix })
    }

    /// Like `new`, taking the penalty policy from `config`.
    pub fn from_config(graph: GraphModel, config: &SolverConfig) -> Result<Self> {
        Self::new(graph, config.penalty)
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn matrix(&self) -> &QuboMatrix {
        &self.matrix
    }

    /// Energy of an externally produced vector.
    pub fn energy(&self, bits: &BitVector) -> Result<f64> {
        self.matrix.check_len(bits)?;
        Ok(self.matrix.energy(bits))
    }

    /// Draw `config.samples` candidates and refine them. The penalty field of
    /// `config` is ignored here; it was consumed when the router was built.
    pub fn solve<S: Sampler + ?Sized>(&self, sampler: &mut S, config: &SolverConfig) -> Result<SolveReport> {
        solve::solve(&self.graph, &self.matrix, sampler, config)
    }

    /// Refine a single candidate as sample `index` of a run under `config`.
    /// The same budget checks as `solve` apply.
    pub fn refine(&self, bits: &BitVector, index: usize, config: &SolverConfig) -> Result<SampleOutcome> {
        config.validate()?;
        self.matrix.check_len(bits)?;
        Ok(RestartOrchestrator::new(&self.graph, &self.matrix, config).refine_sample(index, bits))
    }

    /// Interpret a vector as a route without refining it.
    pub fn decode(&self, bits: &BitVector) -> Result<Extraction> {
        self.matrix.check_len(bits)?;
        Ok(refine::extract(&self.graph, bits))
    }

    /// Exhaustive minimum over all 2^E vectors.
    pub fn brute_force(&self) -> Result<OracleResult> {
        oracle::brute_force(&self.matrix)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid penalty: {0}")]
    InvalidPenalty(f64),

    #[error("Penalty {penalty} does not exceed the maximum simple path cost {bound}")]
    PenaltyTooSmall { penalty: f64, bound: f64 },

    #[error("Dimension mismatch: expected {expected} variables, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("No feasible path after {samples} samples and {restarts} descent passes")]
    NoFeasiblePath { samples: usize, restarts: usize },

    #[error("Too many variables: {got} (max {max})")]
    TooManyVariables { got: usize, max: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
