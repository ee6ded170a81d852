//! Public solver result types.

use serde::{Deserialize, Serialize};

use crate::board::Position;

/// What the solver proved about a cell, relative to one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// The cell is a mine in every valid completion of the board.
    Mine,
    /// The cell is mine-free in every valid completion of the board.
    Safe,
}

/// A proven `(cell, verdict)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub pos: Position,
    pub verdict: Verdict,
}

/// An instruction for the action executor.
///
/// Actions derived from one snapshot carry no ordering dependency; the
/// executor may apply them in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Open the cell at this position.
    Open(Position),
    /// Flag the cell at this position as a mine.
    Flag(Position),
}

impl Action {
    pub fn position(&self) -> Position {
        match self {
            Action::Open(pos) | Action::Flag(pos) => *pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_position() {
        let pos = Position::new(3, 7);
        assert_eq!(Action::Open(pos).position(), pos);
        assert_eq!(Action::Flag(pos).position(), pos);
    }

    #[test]
    fn test_action_serde() {
        let action = Action::Flag(Position::new(1, 2));
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
