//! # Feasibility Recovery
//!
//! Post-processing that turns an arbitrary sampler output into a valid route:
//!
//! ```text
//! raw sample ─▶ descend ─▶ strip ─▶ descend ─▶ extract ─▶ Path | Infeasible
//! ```
//!
//! Every step is a pure function over its inputs. None of them trusts the
//! sampler; a sample that cannot be repaired simply yields `Infeasible`.

pub mod descent;
pub mod cycles;
pub mod extract;

pub use descent::{descend, multi_descent, DescentMode, DescentOutcome, IMPROVEMENT_TOL};
pub use cycles::{strip, StripOutcome};
pub use extract::{extract, Extraction, Infeasible};
