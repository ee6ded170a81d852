//! Frontier and constraint extraction. Built once per solve call from
//! the snapshot; all later passes operate on frontier indices instead
//! of positions.

use std::collections::HashMap;

use crate::board::{Board, Position};
use crate::error::SolveError;

/// One opened cell's requirement on its unknown neighbors: exactly
/// `mines` of the frontier cells in `cells` are mines. Flagged
/// neighbors are already subtracted from the count.
#[derive(Debug, Clone)]
pub(crate) struct Constraint {
    /// The opened cell this constraint was derived from.
    pub origin: Position,
    /// Frontier indices of the unknown neighbors, ascending.
    pub cells: Vec<usize>,
    pub mines: usize,
}

/// The active constraint set of a snapshot: the frontier (unknown cells
/// adjacent to at least one opened cell, row-major) plus one constraint
/// per opened cell with unknown neighbors.
#[derive(Debug)]
pub(crate) struct ConstraintSystem {
    pub frontier: Vec<Position>,
    pub constraints: Vec<Constraint>,
}

impl ConstraintSystem {
    /// Scan the snapshot. Fails if any opened cell's remaining count is
    /// negative or exceeds its unknown-neighbor count: such a snapshot
    /// is self-contradictory and must not be solved around.
    pub fn from_board(board: &Board) -> Result<Self, SolveError> {
        let mut frontier = Vec::new();
        let mut index: HashMap<Position, usize> = HashMap::new();
        for pos in board.positions() {
            if !board.cell(pos).is_unknown() {
                continue;
            }
            if board
                .neighbors(pos)
                .any(|n| board.cell(n).opened_count().is_some())
            {
                index.insert(pos, frontier.len());
                frontier.push(pos);
            }
        }

        let mut constraints = Vec::new();
        for pos in board.positions() {
            let Some(count) = board.cell(pos).opened_count() else {
                continue;
            };
            let mut cells = Vec::new();
            let mut flagged = 0usize;
            for neighbor in board.neighbors(pos) {
                match board.cell(neighbor) {
                    s if s.is_flagged() => flagged += 1,
                    s if s.is_unknown() => cells.push(index[&neighbor]),
                    _ => {}
                }
            }
            let required = count as i32 - flagged as i32;
            if required < 0 || required as usize > cells.len() {
                return Err(SolveError::UnsatisfiableCount {
                    pos,
                    required,
                    unknown: cells.len(),
                });
            }
            if cells.is_empty() {
                continue; // vacuous
            }
            cells.sort_unstable();
            constraints.push(Constraint {
                origin: pos,
                cells,
                mines: required as usize,
            });
        }

        Ok(Self {
            frontier,
            constraints,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }
}
