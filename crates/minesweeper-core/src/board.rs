//! Board snapshot: an immutable H×W grid of per-cell status.
//!
//! The snapshot is the solver's only input. Whatever encoding the board
//! source uses (numeric overlays, DOM classes, ...) must be normalized
//! into [`CellState`] before it reaches this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Status of a single cell as seen by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Unrevealed and unflagged.
    Unknown,
    /// Marked as a mine by the player (not necessarily proven).
    Flagged,
    /// Revealed, showing the number of adjacent mines (0..=8).
    Opened(u8),
}

impl CellState {
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, CellState::Unknown)
    }

    #[inline]
    pub fn is_flagged(&self) -> bool {
        matches!(self, CellState::Flagged)
    }

    /// The adjacent-mine count if the cell is opened.
    #[inline]
    pub fn opened_count(&self) -> Option<u8> {
        match self {
            CellState::Opened(n) => Some(*n),
            _ => None,
        }
    }
}

/// A cell coordinate: row 0 at the top, column 0 at the left.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An immutable snapshot of the visible board.
///
/// Row-major storage with dimensions fixed at construction. The solver
/// never mutates a snapshot; each invocation recomputes everything it
/// needs from one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// A fully unrevealed board.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![CellState::Unknown; height * width],
        }
    }

    /// Build a snapshot from explicit rows. Rows must all have the same
    /// length and opened counts must not exceed 8.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let mut cells = Vec::with_capacity(height * width);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::NotRectangular);
            }
            for (c, cell) in row.into_iter().enumerate() {
                if let CellState::Opened(n) = cell {
                    if n > 8 {
                        return Err(BoardError::CountOutOfRange {
                            pos: Position::new(r, c),
                            count: n,
                        });
                    }
                }
                cells.push(cell);
            }
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Parse a snapshot from text: `.` unknown, `F` flagged, `0`..`8`
    /// opened. Spaces within a line are ignored, one line per row.
    pub fn from_string(s: &str) -> Result<Self, BoardError> {
        let mut rows = Vec::new();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for ch in line.chars() {
                match ch {
                    ' ' => continue,
                    '.' => row.push(CellState::Unknown),
                    'F' => row.push(CellState::Flagged),
                    '0'..='8' => row.push(CellState::Opened(ch as u8 - b'0')),
                    other => return Err(BoardError::UnknownCellChar(other)),
                }
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    #[inline]
    pub fn cell(&self, pos: Position) -> CellState {
        self.cells[self.index(pos)]
    }

    pub(crate) fn set_cell(&mut self, pos: Position, state: CellState) {
        let idx = self.index(pos);
        self.cells[idx] = state;
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Position::new(row, col)))
    }

    /// The up-to-8 grid-adjacent positions, clipped at the edges.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let row_lo = pos.row.saturating_sub(1);
        let row_hi = (pos.row + 1).min(self.height.saturating_sub(1));
        let col_lo = pos.col.saturating_sub(1);
        let col_hi = (pos.col + 1).min(self.width.saturating_sub(1));
        (row_lo..=row_hi)
            .flat_map(move |row| (col_lo..=col_hi).map(move |col| Position::new(row, col)))
            .filter(move |&p| p != pos)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let ch = match self.cell(Position::new(row, col)) {
                    CellState::Unknown => '.',
                    CellState::Flagged => 'F',
                    CellState::Opened(n) => (b'0' + n) as char,
                };
                f.write_fmt(format_args!("{ch}"))?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_roundtrip() {
        let text = "01.\n12F\n.2.\n";
        let board = Board::from_string(text).unwrap();
        assert_eq!(board.height(), 3);
        assert_eq!(board.width(), 3);
        assert_eq!(board.cell(Position::new(0, 0)), CellState::Opened(0));
        assert_eq!(board.cell(Position::new(1, 2)), CellState::Flagged);
        assert_eq!(board.cell(Position::new(2, 0)), CellState::Unknown);
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn test_from_string_rejects_garbage() {
        assert_eq!(
            Board::from_string("0x\n..").unwrap_err(),
            BoardError::UnknownCellChar('x')
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![
            vec![CellState::Unknown, CellState::Unknown],
            vec![CellState::Unknown],
        ];
        assert_eq!(Board::from_rows(rows).unwrap_err(), BoardError::NotRectangular);
    }

    #[test]
    fn test_from_rows_rejects_count_over_eight() {
        let rows = vec![vec![CellState::Opened(9)]];
        assert_eq!(
            Board::from_rows(rows).unwrap_err(),
            BoardError::CountOutOfRange {
                pos: Position::new(0, 0),
                count: 9
            }
        );
    }

    #[test]
    fn test_neighbors_corner_and_center() {
        let board = Board::new(3, 3);
        let corner: Vec<_> = board.neighbors(Position::new(0, 0)).collect();
        assert_eq!(
            corner,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
        let center: Vec<_> = board.neighbors(Position::new(1, 1)).collect();
        assert_eq!(center.len(), 8);
        assert!(!center.contains(&Position::new(1, 1)));
    }

    #[test]
    fn test_neighbors_on_single_row() {
        let board = Board::new(1, 3);
        let mid: Vec<_> = board.neighbors(Position::new(0, 1)).collect();
        assert_eq!(mid, vec![Position::new(0, 0), Position::new(0, 2)]);
    }

    #[test]
    fn test_cell_state_serde() {
        let json = serde_json::to_string(&CellState::Opened(3)).unwrap();
        let back: CellState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CellState::Opened(3));
    }
}
