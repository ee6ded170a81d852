//! Simple propagation pass: the two cheap single-constraint rules,
//! iterated to a fixpoint.
//!
//! A constraint needing 0 mines proves all its cells safe; one needing
//! as many mines as it has cells proves them all mines. Each round
//! removes resolved cells from the surviving constraints and re-checks,
//! since resolving a cell can make another constraint trivial. The
//! fixpoint is order-independent.

use tracing::trace;

use crate::board::Position;
use crate::error::SolveError;
use crate::solver::frontier::{Constraint, ConstraintSystem};
use crate::solver::types::Verdict;

/// Verdicts so far (indexed by frontier index) plus the constraints
/// that still have unresolved cells, reduced accordingly.
#[derive(Debug)]
pub(crate) struct PassState {
    pub verdicts: Vec<Option<Verdict>>,
    pub constraints: Vec<Constraint>,
}

impl PassState {
    /// Record a verdict, rejecting contradictions.
    pub fn assign(
        &mut self,
        frontier: &[Position],
        cell: usize,
        verdict: Verdict,
    ) -> Result<bool, SolveError> {
        match self.verdicts[cell] {
            None => {
                self.verdicts[cell] = Some(verdict);
                Ok(true)
            }
            Some(existing) if existing == verdict => Ok(false),
            Some(_) => Err(SolveError::ConflictingVerdicts {
                pos: frontier[cell],
            }),
        }
    }

    pub fn unresolved(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_none()).count()
    }
}

/// Run the propagation loop until a round makes no new deduction.
pub(crate) fn to_fixpoint(system: &ConstraintSystem) -> Result<PassState, SolveError> {
    let mut state = PassState {
        verdicts: vec![None; system.frontier.len()],
        constraints: system.constraints.clone(),
    };

    loop {
        let mut changed = false;

        // Reduce: drop resolved cells, decrement counts for proven mines.
        let mut survivors = Vec::with_capacity(state.constraints.len());
        for constraint in state.constraints.drain(..) {
            let mut cells = Vec::with_capacity(constraint.cells.len());
            let mut mines = constraint.mines as i32;
            for &cell in &constraint.cells {
                match state.verdicts[cell] {
                    None => cells.push(cell),
                    Some(Verdict::Mine) => mines -= 1,
                    Some(Verdict::Safe) => {}
                }
            }
            if mines < 0 || mines as usize > cells.len() {
                return Err(SolveError::UnsatisfiableCount {
                    pos: constraint.origin,
                    required: mines,
                    unknown: cells.len(),
                });
            }
            if cells.is_empty() {
                continue;
            }
            survivors.push(Constraint {
                origin: constraint.origin,
                cells,
                mines: mines as usize,
            });
        }
        state.constraints = survivors;

        // Apply the trivial rules.
        let mut pending: Vec<(usize, Verdict)> = Vec::new();
        for constraint in &state.constraints {
            if constraint.mines == 0 {
                pending.extend(constraint.cells.iter().map(|&c| (c, Verdict::Safe)));
            } else if constraint.mines == constraint.cells.len() {
                pending.extend(constraint.cells.iter().map(|&c| (c, Verdict::Mine)));
            }
        }
        for (cell, verdict) in pending {
            if state.assign(&system.frontier, cell, verdict)? {
                trace!(pos = %system.frontier[cell], ?verdict, "propagation verdict");
                changed = true;
            }
        }

        if !changed {
            return Ok(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn run(text: &str) -> PassState {
        let board = Board::from_string(text).unwrap();
        let system = ConstraintSystem::from_board(&board).unwrap();
        to_fixpoint(&system).unwrap()
    }

    #[test]
    fn test_saturated_count_proves_mines() {
        // Opened(1) at the corner whose only unknown neighbor is (0,1).
        let state = run(
            "1.1\n\
             111\n\
             000",
        );
        assert_eq!(state.verdicts, vec![Some(Verdict::Mine)]);
    }

    #[test]
    fn test_zero_count_proves_safe() {
        let state = run(
            "...\n\
             .0.\n\
             ...",
        );
        assert_eq!(state.verdicts.len(), 8);
        assert!(state.verdicts.iter().all(|v| *v == Some(Verdict::Safe)));
    }

    #[test]
    fn test_resolution_cascades_between_constraints() {
        // The flag satisfies the 1; its remaining neighbors become
        // safe, which in turn trivializes nothing else here but must
        // still terminate cleanly.
        let state = run(
            "F1.\n\
             .1.\n\
             ...",
        );
        assert_eq!(state.unresolved(), 0);
        assert!(state.verdicts.iter().all(|v| *v == Some(Verdict::Safe)));
    }

    #[test]
    fn test_underdetermined_constraint_makes_no_call() {
        // One mine among three unknowns: nothing is provable.
        let state = run(
            "1..\n\
             ...\n\
             ...",
        );
        assert_eq!(state.unresolved(), 3);
        assert_eq!(state.constraints.len(), 1);
    }

    #[test]
    fn test_conflicting_neighbors_is_invalid() {
        // The zeros prove (0,1) safe while the saturated ones prove it
        // a mine.
        let board = Board::from_string(
            "0.1\n\
             001",
        )
        .unwrap();
        let system = ConstraintSystem::from_board(&board).unwrap();
        let err = to_fixpoint(&system).unwrap_err();
        assert!(matches!(
            err,
            SolveError::ConflictingVerdicts { .. } | SolveError::UnsatisfiableCount { .. }
        ));
    }
}
