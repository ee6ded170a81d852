//! Simulated games for exercising the solver end to end.
//!
//! A [`Game`] owns the hidden mine field plus the visible snapshot the
//! solver sees. Mines are placed on the first open, never under it, so
//! a game cannot be lost on the opening move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, CellState, Position};

/// Outcome of an open, from the game's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// A full game: hidden mine field plus the visible snapshot.
#[derive(Debug)]
pub struct Game {
    board: Board,
    mines: Vec<bool>,
    mine_count: usize,
    opened: usize,
    placed: bool,
    lost: bool,
    rng: StdRng,
}

impl Game {
    /// Set up a game; mine placement is deferred to the first open.
    pub fn new(height: usize, width: usize, mine_count: usize, rng: StdRng) -> Self {
        assert!(
            mine_count < height * width,
            "mine count must leave at least one free cell"
        );
        Self {
            board: Board::new(height, width),
            mines: vec![false; height * width],
            mine_count,
            opened: 0,
            placed: false,
            lost: false,
            rng,
        }
    }

    pub fn from_seed(height: usize, width: usize, mine_count: usize, seed: u64) -> Self {
        Self::new(height, width, mine_count, StdRng::seed_from_u64(seed))
    }

    /// The snapshot to hand to the solver.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the hidden field holds a mine here. Test oracle; a
    /// player never sees this.
    pub fn is_mine(&self, pos: Position) -> bool {
        self.mines[pos.row * self.board.width() + pos.col]
    }

    /// Open a cell. The first open places the mines everywhere but
    /// there; opening a zero floods its neighborhood. Opening a cell
    /// that is not `Unknown` does nothing.
    pub fn open(&mut self, pos: Position) -> GameStatus {
        if !self.placed {
            self.place_mines(pos);
            self.placed = true;
        }
        if self.lost || !self.board.cell(pos).is_unknown() {
            return self.status();
        }
        if self.is_mine(pos) {
            self.lost = true;
            return GameStatus::Lost;
        }

        // Iterative flood: zero cells open their whole neighborhood. A
        // zero has no mine neighbors, so nothing on the stack is mined.
        let mut stack = vec![pos];
        while let Some(cur) = stack.pop() {
            if !self.board.cell(cur).is_unknown() {
                continue;
            }
            let count = self.adjacent_mines(cur);
            self.board.set_cell(cur, CellState::Opened(count));
            self.opened += 1;
            if count == 0 {
                let unknown: Vec<Position> = self
                    .board
                    .neighbors(cur)
                    .filter(|&n| self.board.cell(n).is_unknown())
                    .collect();
                stack.extend(unknown);
            }
        }
        self.status()
    }

    fn status(&self) -> GameStatus {
        if self.lost {
            GameStatus::Lost
        } else if self.opened == self.mines.len() - self.mine_count {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    /// Flag an unopened cell in the snapshot.
    pub fn flag(&mut self, pos: Position) {
        if self.board.cell(pos).is_unknown() {
            self.board.set_cell(pos, CellState::Flagged);
        }
    }

    fn adjacent_mines(&self, pos: Position) -> u8 {
        self.board.neighbors(pos).filter(|&n| self.is_mine(n)).count() as u8
    }

    fn place_mines(&mut self, exclude: Position) {
        let width = self.board.width();
        let mut indices: Vec<usize> = (0..self.mines.len())
            .filter(|&i| i != exclude.row * width + exclude.col)
            .collect();
        indices.shuffle(&mut self.rng);
        for &i in indices.iter().take(self.mine_count) {
            self.mines[i] = true;
        }
    }
}
