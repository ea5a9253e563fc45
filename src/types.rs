//! Newtype wrappers for board coordinates and value-table keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on an N×N board.
///
/// Rows and columns are zero-based with `(0, 0)` in the top-left corner.
/// Positions order row-major, which is also the order candidate moves are
/// enumerated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Convert a row-major cell index into a position on a board of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `size` is zero.
    /// Indices past the last cell are not rejected here; they produce a
    /// position the engine reports as out of range.
    pub fn from_index(index: usize, size: usize) -> Result<Self, crate::Error> {
        if size == 0 {
            return Err(crate::Error::config("board size must be at least 1"));
        }
        Ok(Position {
            row: index / size,
            col: index % size,
        })
    }

    /// Row-major index of this position on a board of `size`.
    pub fn index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Whether the position addresses a cell on a board of `size`.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Canonical, hashable encoding of a board's cell contents.
///
/// The key is the row-major flattening of the cells, one character per cell
/// (`.` empty, `X`, `O`). Two boards with identical contents always produce
/// the same key; for a fixed board size distinct contents never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Wrap an already-encoded key.
    pub fn new(encoding: String) -> Self {
        StateKey(encoding)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_index_roundtrip() {
        let pos = Position::from_index(5, 3).unwrap();
        assert_eq!(pos, Position::new(1, 2));
        assert_eq!(pos.index(3), 5);
    }

    #[test]
    fn test_position_rejects_zero_size() {
        assert!(Position::from_index(0, 0).is_err());
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(2, 2).in_bounds(3));
        assert!(!Position::new(3, 0).in_bounds(3));
        assert!(!Position::new(0, 3).in_bounds(3));
    }

    #[test]
    fn test_positions_order_row_major() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 2),
            Position::new(0, 0),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(1, 0)
            ]
        );
    }
}
