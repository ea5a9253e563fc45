//! Game engine: turn order, move validation and terminal detection

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};
use super::lines::{Line, LineJudge, LineState};
use crate::types::Position;

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub player: Player,
    pub position: Position,
}

/// Status of the game state machine. `Ongoing` is initial, the others terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Draw,
    Won,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Swap the winner perspective (X ↔ O)
    pub fn swap_players(self) -> Self {
        match self {
            GameOutcome::Win(player) => GameOutcome::Win(player.opponent()),
            GameOutcome::Draw => GameOutcome::Draw,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win(player) => write!(f, "{player} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Owns a board and enforces the rules of play on it.
///
/// X moves first. After every successful [`play`](GameEngine::play) the
/// engine re-judges the lines through the new mark: a completed line ends the
/// game as `Won`, and once every line holds marks of both sides the game ends
/// as `Draw`, possibly before the board is full.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    next_player: Option<Player>,
    status: GameStatus,
    winner: Option<Player>,
    moves: Vec<Move>,
    judge: LineJudge,
}

impl GameEngine {
    /// Create an engine with an empty `size`×`size` board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `size` is zero.
    pub fn new(size: usize) -> crate::Result<Self> {
        if size == 0 {
            return Err(crate::Error::config("board size must be at least 1"));
        }
        Ok(GameEngine {
            board: Board::new(size),
            next_player: Some(Player::X),
            status: GameStatus::Ongoing,
            winner: None,
            moves: Vec::with_capacity(size * size),
            judge: LineJudge::new(size),
        })
    }

    /// Place `player`'s mark at `position`.
    ///
    /// Returns the status and winner after the move.
    ///
    /// # Errors
    ///
    /// Checked in this order, so a finished game always reports
    /// [`GameAlreadyOver`](crate::Error::GameAlreadyOver) whatever the arguments:
    /// - `GameAlreadyOver` if the status is not `Ongoing`
    /// - `InvalidTurn` if `player` is not the next player
    /// - `OutOfRange` if `position` is off the board
    /// - `CellOccupied` if the cell already holds a mark
    pub fn play(
        &mut self,
        player: Player,
        position: Position,
    ) -> crate::Result<(GameStatus, Option<Player>)> {
        if self.status.is_terminal() {
            return Err(crate::Error::GameAlreadyOver);
        }
        if self.next_player != Some(player) {
            return Err(crate::Error::InvalidTurn {
                expected: self.next_player,
                got: player,
            });
        }
        let size = self.board.size();
        if !position.in_bounds(size) {
            return Err(crate::Error::OutOfRange {
                row: position.row,
                col: position.col,
                size,
            });
        }
        if !self.board.is_empty(position) {
            return Err(crate::Error::CellOccupied {
                row: position.row,
                col: position.col,
            });
        }

        self.board.place(position, player);
        self.moves.push(Move { player, position });

        if let Some(winner) = self.judge.record(&self.board, position) {
            self.status = GameStatus::Won;
            self.winner = Some(winner);
            self.next_player = None;
        } else if self.judge.all_dead() {
            self.status = GameStatus::Draw;
            self.next_player = None;
        } else {
            self.next_player = Some(player.opponent());
        }

        Ok((self.status, self.winner))
    }

    /// Play at a row-major cell index.
    ///
    /// # Errors
    ///
    /// Same as [`play`](GameEngine::play).
    pub fn play_index(
        &mut self,
        player: Player,
        index: usize,
    ) -> crate::Result<(GameStatus, Option<Player>)> {
        let position = Position::from_index(index, self.board.size())?;
        self.play(player, position)
    }

    /// True iff the game is ongoing and the cell at `position` is empty
    pub fn is_vacant(&self, position: Position) -> bool {
        self.status == GameStatus::Ongoing && self.board.is_empty(position)
    }

    /// Read-only snapshot of the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// The player to move, or `None` once the game is over
    pub fn next_player(&self) -> Option<Player> {
        self.next_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Final outcome, or `None` while the game is ongoing
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::Ongoing => None,
            GameStatus::Draw => Some(GameOutcome::Draw),
            GameStatus::Won => self.winner.map(GameOutcome::Win),
        }
    }

    /// Number of successful moves so far
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Moves in the order they were played
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Current state of every line
    pub fn line_states(&self) -> Vec<(Line, LineState)> {
        self.judge.states()
    }
}

impl fmt::Display for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_new_engine() {
        let engine = GameEngine::new(3).unwrap();
        assert_eq!(engine.status(), GameStatus::Ongoing);
        assert_eq!(engine.next_player(), Some(Player::X));
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.move_count(), 0);
        assert!(GameEngine::new(0).is_err());
    }

    #[test]
    fn test_turns_alternate() {
        let mut engine = GameEngine::new(3).unwrap();
        engine.play(Player::X, p(1, 1)).unwrap();
        assert_eq!(engine.next_player(), Some(Player::O));
        engine.play(Player::O, p(0, 0)).unwrap();
        assert_eq!(engine.next_player(), Some(Player::X));
        assert_eq!(engine.board().occupied_count(), 2);
    }

    #[test]
    fn test_invalid_turn() {
        let mut engine = GameEngine::new(3).unwrap();
        let err = engine.play(Player::O, p(0, 0)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTurn {
                expected: Some(Player::X),
                got: Player::O
            }
        ));
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn test_out_of_range_and_occupied() {
        let mut engine = GameEngine::new(3).unwrap();
        assert!(matches!(
            engine.play(Player::X, p(3, 0)),
            Err(Error::OutOfRange { row: 3, col: 0, size: 3 })
        ));
        engine.play(Player::X, p(0, 0)).unwrap();
        assert!(matches!(
            engine.play(Player::O, p(0, 0)),
            Err(Error::CellOccupied { row: 0, col: 0 })
        ));
        assert_eq!(engine.next_player(), Some(Player::O));
    }

    #[test]
    fn test_row_win() {
        let mut engine = GameEngine::new(3).unwrap();
        engine.play(Player::X, p(0, 0)).unwrap();
        engine.play(Player::O, p(1, 0)).unwrap();
        engine.play(Player::X, p(0, 1)).unwrap();
        engine.play(Player::O, p(1, 1)).unwrap();
        let (status, winner) = engine.play(Player::X, p(0, 2)).unwrap();
        assert_eq!(status, GameStatus::Won);
        assert_eq!(winner, Some(Player::X));
        assert_eq!(engine.next_player(), None);
        assert_eq!(engine.outcome(), Some(GameOutcome::Win(Player::X)));
    }

    #[test]
    fn test_game_already_over_checked_first() {
        let mut engine = GameEngine::new(1).unwrap();
        let (status, winner) = engine.play(Player::X, p(0, 0)).unwrap();
        assert_eq!(status, GameStatus::Won);
        assert_eq!(winner, Some(Player::X));

        assert!(matches!(
            engine.play(Player::O, p(5, 5)),
            Err(Error::GameAlreadyOver)
        ));
        assert!(matches!(
            engine.play(Player::X, p(0, 0)),
            Err(Error::GameAlreadyOver)
        ));
        assert!(!engine.is_vacant(p(0, 0)));
    }

    #[test]
    fn test_early_draw_before_board_full() {
        // X O X
        // X O O
        // O X .   every line is mixed before the last cell is filled
        let mut engine = GameEngine::new(3).unwrap();
        let script = [
            (Player::X, p(0, 0)),
            (Player::O, p(0, 1)),
            (Player::X, p(0, 2)),
            (Player::O, p(1, 1)),
            (Player::X, p(1, 0)),
            (Player::O, p(1, 2)),
            (Player::X, p(2, 1)),
            (Player::O, p(2, 0)),
        ];
        let mut last = (GameStatus::Ongoing, None);
        for (player, pos) in script {
            last = engine.play(player, pos).unwrap();
        }
        assert_eq!(last, (GameStatus::Draw, None));
        assert_eq!(engine.move_count(), 8);
        assert!(!engine.board().is_full());
        assert!(engine.line_states().iter().all(|(_, s)| s.is_dead()));
    }

    #[test]
    fn test_play_index() {
        let mut engine = GameEngine::new(3).unwrap();
        engine.play_index(Player::X, 4).unwrap();
        assert_eq!(engine.moves()[0].position, p(1, 1));
        assert!(matches!(
            engine.play_index(Player::O, 9),
            Err(Error::OutOfRange { row: 3, col: 0, size: 3 })
        ));
    }

    #[test]
    fn test_display() {
        let mut engine = GameEngine::new(3).unwrap();
        engine.play(Player::X, p(1, 1)).unwrap();
        assert_eq!(engine.to_string(), "...\n.X.\n...");
    }
}
