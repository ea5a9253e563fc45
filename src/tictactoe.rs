//! N×N Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Player};
pub use game::{GameEngine, GameOutcome, GameStatus, Move};
pub use lines::{Line, LineJudge, LineState};
