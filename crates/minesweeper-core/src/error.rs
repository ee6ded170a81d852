//! Error types.
//!
//! An empty action list is *not* an error: it means no certain move
//! exists. Every [`SolveError`] variant signals a contradictory
//! snapshot, which the solver surfaces instead of guessing past.

use thiserror::Error;

use crate::board::Position;

/// Snapshot construction failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("rows have differing lengths")]
    NotRectangular,
    #[error("opened cell {pos} shows {count} adjacent mines, maximum is 8")]
    CountOutOfRange { pos: Position, count: u8 },
    #[error("unrecognized cell character {0:?}")]
    UnknownCellChar(char),
}

/// The snapshot is inconsistent with Minesweeper rules (stale or
/// mis-parsed input). The solver aborts without emitting any action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// An opened cell's count cannot be met by its neighborhood.
    #[error(
        "invalid snapshot: opened cell {pos} needs {required} mines among \
         {unknown} unknown neighbors"
    )]
    UnsatisfiableCount {
        pos: Position,
        required: i32,
        unknown: usize,
    },
    /// Two constraints forced opposite verdicts for the same cell.
    #[error("invalid snapshot: cell {pos} proven both safe and mined")]
    ConflictingVerdicts { pos: Position },
    /// A cluster admits no mine placement satisfying its constraints.
    #[error("invalid snapshot: no consistent mine placement for a cluster of {cells} cells")]
    NoConsistentAssignment { cells: usize },
}
