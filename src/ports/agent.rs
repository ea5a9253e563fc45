//! Agent port - abstraction over anything that can pick a move
//!
//! The harness drives every player through this trait:
//! - Learners (Q-learning)
//! - Baselines (uniform random)

use crate::{Result, tictactoe::Board, types::Position};

/// Agent trait - the single capability the harness needs from a player
///
/// Agents receive a read-only board snapshot and answer with the cell they
/// want to mark. The engine validates every answer independently, so an agent
/// is never trusted to produce a legal move.
///
/// # Examples
///
/// ```no_run
/// use qtoe::{ports::Agent, tictactoe::Board, types::Position};
///
/// struct FirstEmpty;
///
/// impl Agent for FirstEmpty {
///     fn choose_move(&mut self, board: &Board) -> Option<Position> {
///         board.empty_positions().first().copied()
///     }
///
///     fn name(&self) -> &str {
///         "first-empty"
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Select a move for the given board.
    ///
    /// Returns `None` only when the board has no empty cell.
    fn choose_move(&mut self, board: &Board) -> Option<Position>;

    /// Get the agent's name.
    ///
    /// Used as the role label in progress reports and summaries.
    fn name(&self) -> &str;

    /// Called before the first move of every episode.
    ///
    /// Learners use this to drop any partial trajectory left over from an
    /// aborted episode. The default does nothing.
    fn begin_episode(&mut self) {}

    /// Receive the terminal reward for the episode that just ended.
    ///
    /// The reward is already expressed from this agent's own perspective.
    /// Non-learning agents keep the default no-op.
    fn update_from_result(&mut self, _reward: f64) -> Result<()> {
        Ok(())
    }

    /// Seed the agent's internal random number generator.
    ///
    /// The harness calls this when the experiment is configured with a seed
    /// so whole runs are reproducible. Deterministic agents can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Number of (state, action) values the agent has learned, if it keeps a
    /// value table at all.
    fn value_table_size(&self) -> Option<usize> {
        None
    }
}
