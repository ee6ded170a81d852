//! Minesweeper deduction engine.
//!
//! Consumes an immutable board snapshot and proves, with zero guessing,
//! which unopened cells are safe to open and which are mines. Acquiring
//! snapshots from a live game and applying the resulting actions are the
//! host's concern; this crate only deduces.

mod board;
mod error;
pub mod sim;
mod solver;

pub use board::{Board, CellState, Position};
pub use error::{BoardError, SolveError};
pub use solver::{Action, Deduction, Solver, Verdict};
