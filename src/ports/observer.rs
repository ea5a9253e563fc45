//! Observer port - abstraction for experiment observation and data collection
//!
//! This port defines the interface for observing experiment events,
//! allowing composable data collection without coupling the harness loop
//! to specific output formats or metrics.

use crate::{
    Result,
    pipeline::{EpisodeRecord, IntervalReport, OutcomeTally},
    tictactoe::{Board, Move},
};

/// Observer trait for monitoring experiment runs
///
/// Observers can be composed to collect different types of data during a run:
/// - Interval progress lines for the operator
/// - Progress bars
/// - JSONL export for analysis
/// - Metrics tracking
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_run_start(total_episodes, ..)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_move(...)` - For each move in the episode, after it is applied
///    - `on_episode_end(record)` - After rewards have been delivered
///    - `on_interval(report)` - Every `report_interval` episodes
/// 3. `on_run_end(tally)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use qtoe::{pipeline::EpisodeRecord, ports::Observer};
///
/// struct EpisodeCounter {
///     count: usize,
/// }
///
/// impl Observer for EpisodeCounter {
///     fn on_episode_end(&mut self, _record: &EpisodeRecord) -> qtoe::Result<()> {
///         self.count += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when a run starts.
    ///
    /// `learner` and `opponent` are the agents' names, used as role labels.
    fn on_run_start(&mut self, _total_episodes: usize, _learner: &str, _opponent: &str) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (`episode` is 0-based).
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each move, after the engine has applied it.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode
    /// * `step` - Step number within the episode (0-based)
    /// * `mv` - The move that was played
    /// * `board` - Board after the move
    fn on_move(&mut self, _episode: usize, _step: usize, _mv: Move, _board: &Board) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends and both agents have been rewarded.
    fn on_episode_end(&mut self, _record: &EpisodeRecord) -> Result<()> {
        Ok(())
    }

    /// Called every `report_interval` episodes with the interval-local counts.
    fn on_interval(&mut self, _report: &IntervalReport) -> Result<()> {
        Ok(())
    }

    /// Called when the run ends.
    ///
    /// Does nothing by default. Override to perform cleanup or final reporting.
    fn on_run_end(&mut self, _tally: &OutcomeTally) -> Result<()> {
        Ok(())
    }
}
