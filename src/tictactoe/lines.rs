//! Winning line analysis for N×N Tic-Tac-Toe

use serde::{Deserialize, Serialize};

use super::{Board, Cell, Player};
use crate::types::Position;

/// One of the 2N+2 lines a player can complete to win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right
    MainDiagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Line {
    /// All lines of a `size`×`size` board: rows, then columns, then diagonals
    pub fn all(size: usize) -> Vec<Line> {
        let mut lines = Vec::with_capacity(2 * size + 2);
        lines.extend((0..size).map(Line::Row));
        lines.extend((0..size).map(Line::Column));
        lines.push(Line::MainDiagonal);
        lines.push(Line::AntiDiagonal);
        lines
    }

    /// Positions covered by this line, in order
    pub fn positions(self, size: usize) -> impl Iterator<Item = Position> {
        (0..size).map(move |i| match self {
            Line::Row(r) => Position::new(r, i),
            Line::Column(c) => Position::new(i, c),
            Line::MainDiagonal => Position::new(i, i),
            Line::AntiDiagonal => Position::new(i, size - 1 - i),
        })
    }

    /// Whether `pos` lies on this line
    pub fn contains(self, pos: Position, size: usize) -> bool {
        match self {
            Line::Row(r) => pos.row == r,
            Line::Column(c) => pos.col == c,
            Line::MainDiagonal => pos.row == pos.col,
            Line::AntiDiagonal => pos.row + pos.col + 1 == size,
        }
    }
}

/// Decidedness of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineState {
    /// Still winnable by at least one side
    Pending,
    /// Holds marks of both sides; can never be won
    Dead,
    /// Fully occupied by one side
    Complete(Player),
}

impl LineState {
    /// Classify `line` on `board`
    pub fn evaluate(board: &Board, line: Line) -> LineState {
        let mut has_x = false;
        let mut has_o = false;
        let mut has_empty = false;

        for pos in line.positions(board.size()) {
            match board.get(pos) {
                Some(Cell::X) => has_x = true,
                Some(Cell::O) => has_o = true,
                _ => has_empty = true,
            }
            if has_x && has_o {
                return LineState::Dead;
            }
        }

        match (has_empty, has_x, has_o) {
            (false, true, false) => LineState::Complete(Player::X),
            (false, false, true) => LineState::Complete(Player::O),
            _ => LineState::Pending,
        }
    }

    pub fn is_dead(self) -> bool {
        self == LineState::Dead
    }
}

/// Tracks the state of every line on a board as moves are made.
///
/// Only lines through the most recent move can change, so [`LineJudge::record`]
/// re-evaluates just those.
#[derive(Debug, Clone)]
pub struct LineJudge {
    size: usize,
    lines: Vec<Line>,
    states: Vec<LineState>,
}

impl LineJudge {
    pub fn new(size: usize) -> Self {
        let lines = Line::all(size);
        let states = vec![LineState::Pending; lines.len()];
        LineJudge {
            size,
            lines,
            states,
        }
    }

    /// Re-evaluate the lines through `pos` after a mark was placed there.
    ///
    /// Returns the occupant of the first completed line found, scanning rows,
    /// then columns, then diagonals.
    pub fn record(&mut self, board: &Board, pos: Position) -> Option<Player> {
        let mut winner = None;
        for (line, state) in self.lines.iter().zip(self.states.iter_mut()) {
            if !line.contains(pos, self.size) {
                continue;
            }
            *state = LineState::evaluate(board, *line);
            if let (None, LineState::Complete(player)) = (winner, *state) {
                winner = Some(player);
            }
        }
        winner
    }

    /// True when no line can be won by either side
    pub fn all_dead(&self) -> bool {
        self.states.iter().all(|s| s.is_dead())
    }

    /// Number of lines still winnable
    pub fn pending_count(&self) -> usize {
        self.states
            .iter()
            .filter(|&&s| s == LineState::Pending)
            .count()
    }

    /// Every line paired with its current state
    pub fn states(&self) -> Vec<(Line, LineState)> {
        self.lines
            .iter()
            .copied()
            .zip(self.states.iter().copied())
            .collect()
    }
}
