//! Error types for the qtoe crate

use thiserror::Error;

use crate::tictactoe::Player;

/// Main error type for the qtoe crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid turn: {got:?} tried to move but the next player is {expected:?}")]
    InvalidTurn {
        expected: Option<Player>,
        got: Player,
    },

    #[error("position ({row}, {col}) is out of range for a {size}x{size} board")]
    OutOfRange { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("game already over")]
    GameAlreadyOver,

    #[error("agent '{agent}' returned no move while the game is still ongoing")]
    NoValidMoves { agent: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Shorthand for building an [`Error::InvalidConfiguration`].
    pub fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
