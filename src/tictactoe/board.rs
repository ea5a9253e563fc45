//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Position, StateKey};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player occupying this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Square grid of cell marks, stored row-major.
///
/// A board has no rules of its own; turn order and terminal detection live in
/// [`GameEngine`](super::GameEngine), which is the only code that writes cells.
/// Agents receive `&Board` snapshots and can only read them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `size`×`size` board
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace is ignored; the remaining characters must form a perfect
    /// square number of cells (`.`/`-` empty, `X`, `O`). Intended for tests
    /// and analysis; boards used in play come from a `GameEngine`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the cell count is not
    /// a non-zero perfect square or a character is not a valid cell.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let size = (chars.len() as f64).sqrt().round() as usize;
        if size == 0 || size * size != chars.len() {
            return Err(crate::Error::config(format!(
                "board string '{s}' has {} cells, expected a non-zero perfect square",
                chars.len()
            )));
        }

        let cells = chars
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Cell::from_char(c).ok_or_else(|| {
                    crate::Error::config(format!(
                        "invalid character '{c}' at cell {i} in board string '{s}'"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Board { size, cells })
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the cell at `pos`, or `None` when it lies outside the board
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos.in_bounds(self.size) {
            Some(self.cells[pos.index(self.size)])
        } else {
            None
        }
    }

    /// Check if a position is on the board and empty
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
            .collect()
    }

    /// Count the cells held by `player`
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Whether every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Get the value-table key for the current contents
    pub fn state_key(&self) -> StateKey {
        StateKey::new(self.cells.iter().map(|&c| c.to_char()).collect())
    }

    /// Write a mark; callers validate the position beforehand
    pub(crate) fn place(&mut self, pos: Position, player: Player) {
        let idx = pos.index(self.size);
        self.cells[idx] = player.to_cell();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.size.max(1)).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().map(|&c| c.to_char()).collect();
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new(4);
        assert_eq!(board.size(), 4);
        assert_eq!(board.cells().len(), 16);
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.empty_positions().len(), 16);
    }

    #[test]
    fn test_empty_positions_row_major() {
        let board = Board::from_string("X.. .O. ...").unwrap();
        let empty = board.empty_positions();
        assert_eq!(empty.len(), 7);
        assert_eq!(empty[0], Position::new(0, 1));
        assert_eq!(empty[1], Position::new(0, 2));
        assert_eq!(empty[2], Position::new(1, 0));
        assert_eq!(empty[6], Position::new(2, 2));
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::new(3);
        assert_eq!(board.get(Position::new(0, 0)), Some(Cell::Empty));
        assert_eq!(board.get(Position::new(3, 0)), None);
        assert!(!board.is_empty(Position::new(0, 3)));
    }

    #[test]
    fn test_state_key_tracks_contents() {
        let a = Board::from_string("X...O....").unwrap();
        let b = Board::from_string("X . . . O . . . .").unwrap();
        let c = Board::from_string("O...X....").unwrap();
        assert_eq!(a.state_key(), b.state_key());
        assert_ne!(a.state_key(), c.state_key());
        assert_eq!(a.state_key().as_str(), "X...O....");
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(Board::from_string("").is_err());
        assert!(Board::from_string("X.O.").is_ok());
        assert!(Board::from_string("X.O..").is_err());
        assert!(Board::from_string("X.Q......").is_err());
    }

    #[test]
    fn test_counts() {
        let board = Board::from_string("XOX .O. X..").unwrap();
        assert_eq!(board.count(Player::X), 3);
        assert_eq!(board.count(Player::O), 2);
        assert_eq!(board.occupied_count(), 5);
        assert!(!board.is_full());
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("X.. .O. ..X").unwrap();
        assert_eq!(board.to_string(), "X..\n.O.\n..X");
    }
}
