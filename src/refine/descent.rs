//! Greedy single-bit-flip descent.
//!
//! Descent is a pure function of (matrix, start vector, rng): nothing is
//! shared between calls, so trials can run on any thread in any order.
//!
//! Best-first mode has a structural blind spot. When a sample carries two
//! competing routes into the destination, the flip with the largest single
//! saving wins, even if it discards an edge of the global optimum. Randomized
//! mode picks uniformly among all improving flips instead, and repeated
//! trials reach optima best-first cannot.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{BitVector, VarIndex};
use crate::qubo::QuboMatrix;

/// Flips must lower the energy by more than this to count as improving.
pub const IMPROVEMENT_TOL: f64 = 1e-9;

/// Which improving flip to take at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescentMode {
    /// Most negative delta; ties go to the lowest index. Deterministic.
    BestFirst,
    /// Uniformly random among all improving flips.
    Randomized,
}

/// Local minimum reached by one descent pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DescentOutcome {
    pub bits: BitVector,
    pub energy: f64,
    /// Bits flipped, in order.
    pub flips: Vec<VarIndex>,
}

/// Apply improving flips until none is left.
///
/// Terminates because every flip strictly lowers the energy over a finite
/// state space. `rng` is only consulted in randomized mode.
pub fn descend<R: Rng + ?Sized>(
    matrix: &QuboMatrix,
    start: BitVector,
    mode: DescentMode,
    rng: &mut R,
) -> DescentOutcome {
    let mut bits = start;
    let mut flips = Vec::new();

    loop {
        let candidates = matrix.improving_flips(&bits, IMPROVEMENT_TOL);
        let chosen = match mode {
            DescentMode::BestFirst => candidates
                .iter()
                .copied()
                .min_by(|a, b| a.1.total_cmp(&b.1)),
            DescentMode::Randomized => candidates.choose(rng).copied(),
        };
        let Some((i, _)) = chosen else { break };
        bits.flip(i);
        flips.push(i);
    }

    let energy = matrix.energy(&bits);
    DescentOutcome { bits, energy, flips }
}

/// One best-first pass followed by `trials − 1` randomized passes, all from
/// `start`; keeps the lowest-energy outcome. A later trial replaces the
/// incumbent only if it is better by more than `IMPROVEMENT_TOL`.
pub fn multi_descent<R: Rng + ?Sized>(
    matrix: &QuboMatrix,
    start: &BitVector,
    trials: usize,
    rng: &mut R,
) -> DescentOutcome {
    let mut best = descend(matrix, start.clone(), DescentMode::BestFirst, rng);
    for _ in 1..trials {
        let trial = descend(matrix, start.clone(), DescentMode::Randomized, rng);
        if trial.energy < best.energy - IMPROVEMENT_TOL {
            best = trial;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Duct, GraphModel};
    use crate::qubo::{build, Penalty};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (GraphModel, QuboMatrix) {
        let ducts = [Duct::new("S", "M", 1.0), Duct::new("M", "T", 2.0), Duct::new("S", "T", 4.0)];
        let g = GraphModel::new(["S", "M", "T"], &ducts, "S", "T").unwrap();
        let m = build(&g, Penalty::Fixed(10.0)).unwrap();
        (g, m)
    }

    #[test]
    fn test_best_first_ends_in_local_minimum() {
        let (g, m) = setup();
        let mut rng = StdRng::seed_from_u64(0);
        let all = BitVector::from_active(g.num_vars(), 0..g.num_vars());
        let out = descend(&m, all, DescentMode::BestFirst, &mut rng);
        assert!(m.improving_flips(&out.bits, IMPROVEMENT_TOL).is_empty());
        assert!((out.energy - m.energy(&out.bits)).abs() < 1e-12);
    }

    #[test]
    fn test_flips_replay_monotonically() {
        let (g, m) = setup();
        let mut rng = StdRng::seed_from_u64(7);
        for state in [0u64, 0b101010, 0b111111, 0b010011] {
            let start = BitVector::from_state_msb(state, g.num_vars()).unwrap();
            for mode in [DescentMode::BestFirst, DescentMode::Randomized] {
                let out = descend(&m, start.clone(), mode, &mut rng);
                let mut x = start.clone();
                let mut e = m.energy(&x);
                for &i in &out.flips {
                    x.flip(i);
                    let next = m.energy(&x);
                    assert!(next < e, "flip {i} raised energy {e} -> {next}");
                    e = next;
                }
                assert_eq!(x, out.bits);
            }
        }
    }

    #[test]
    fn test_best_first_breaks_ties_by_lowest_index() {
        // From all-zero: deltas are -1, -2, -2. Bits 1 and 2 tie; once bit 1
        // is set, the coupling makes bit 2 uphill (+1), leaving bit 0.
        let mut m = QuboMatrix::zeros(3, 1.0);
        m.add_term(0, 0, -1.0);
        m.add_term(1, 1, -2.0);
        m.add_term(2, 2, -2.0);
        m.add_term(1, 2, 3.0);

        let start = BitVector::zeros(3);
        assert_eq!(m.delta(&start, 1), m.delta(&start, 2));

        let out = descend(&m, start, DescentMode::BestFirst, &mut StdRng::seed_from_u64(0));
        assert_eq!(out.flips, vec![1, 0]);
        assert_eq!(out.bits.to_string(), "110");
        assert_eq!(out.energy, -3.0);
    }

    #[test]
    fn test_best_first_is_deterministic() {
        let (g, m) = setup();
        let start = BitVector::from_state_msb(0b110101, g.num_vars()).unwrap();
        let a = descend(&m, start.clone(), DescentMode::BestFirst, &mut StdRng::seed_from_u64(1));
        let b = descend(&m, start, DescentMode::BestFirst, &mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_randomized_is_reproducible_per_seed() {
        let (g, m) = setup();
        let start = BitVector::from_state_msb(0b011110, g.num_vars()).unwrap();
        let a = descend(&m, start.clone(), DescentMode::Randomized, &mut StdRng::seed_from_u64(42));
        let b = descend(&m, start, DescentMode::Randomized, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_multi_descent_never_worse_than_best_first() {
        let (g, m) = setup();
        let mut rng = StdRng::seed_from_u64(3);
        for state in 0..(1u64 << g.num_vars()) {
            let start = BitVector::from_state_msb(state, g.num_vars()).unwrap();
            let single = descend(&m, start.clone(), DescentMode::BestFirst, &mut rng);
            let multi = multi_descent(&m, &start, 8, &mut rng);
            assert!(multi.energy <= single.energy + IMPROVEMENT_TOL);
        }
    }
}
