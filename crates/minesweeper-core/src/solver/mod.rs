//! Solver orchestrator.
//!
//! Escalates from cheap single-constraint propagation to exact
//! per-cluster enumeration, emitting only proven moves. Each call
//! consumes one immutable snapshot and recomputes every derived
//! structure from scratch; the solver holds no state across calls.

mod cluster;
mod frontier;
mod propagate;
mod search;
mod types;

use tracing::debug;

use crate::board::Board;
use crate::error::SolveError;
use frontier::ConstraintSystem;

pub use types::{Action, Deduction, Verdict};

/// Unit struct solver — stateless, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Prove cells safe or mined relative to `board`.
    ///
    /// Returns the raw verdicts in row-major order. An empty result
    /// means no certain move exists, which is a normal outcome, not an
    /// error; [`SolveError`] is reserved for contradictory snapshots.
    pub fn deduce(&self, board: &Board) -> Result<Vec<Deduction>, SolveError> {
        let system = ConstraintSystem::from_board(board)?;
        debug!(
            frontier = system.frontier.len(),
            constraints = system.constraints.len(),
            "extracted constraint system"
        );
        if system.is_empty() {
            return Ok(Vec::new());
        }

        let mut state = propagate::to_fixpoint(&system)?;
        let unresolved = state.unresolved();
        if unresolved > 0 {
            let clusters = cluster::partition(system.frontier.len(), &state);
            debug!(
                unresolved,
                clusters = clusters.len(),
                "escalating to exact cluster search"
            );
            for cl in &clusters {
                search::solve_cluster(&system.frontier, &mut state, cl)?;
            }
        }

        // The frontier is built row-major, so this stays ordered.
        Ok(state
            .verdicts
            .iter()
            .enumerate()
            .filter_map(|(cell, verdict)| {
                verdict.map(|verdict| Deduction {
                    pos: system.frontier[cell],
                    verdict,
                })
            })
            .collect())
    }

    /// Full pipeline: verdicts mapped to executor actions.
    ///
    /// `Safe` becomes [`Action::Open`], `Mine` becomes [`Action::Flag`].
    /// Only cells currently `Unknown` produce an action; re-flagging is
    /// a no-op the executor is never asked to perform.
    pub fn solve(&self, board: &Board) -> Result<Vec<Action>, SolveError> {
        let deductions = self.deduce(board)?;
        Ok(deductions
            .into_iter()
            .filter(|d| board.cell(d.pos).is_unknown())
            .map(|d| match d.verdict {
                Verdict::Safe => Action::Open(d.pos),
                Verdict::Mine => Action::Flag(d.pos),
            })
            .collect())
    }
}
