//! Experiment harness: repeated learner-vs-opponent episodes

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::tally::{EpisodeResult, IntervalReport, OutcomeCounts, OutcomeTally};
use crate::{
    Error, Result,
    ports::{Agent, Observer},
    tictactoe::{GameEngine, GameOutcome, Move, Player},
};

/// Terminal rewards, applied from each agent's own perspective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub win: f64,
    pub loss: f64,
    pub draw: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            win: 1.0,
            loss: -1.0,
            draw: 0.2,
        }
    }
}

impl Rewards {
    /// Reward for the learner
    pub fn for_learner(&self, result: EpisodeResult) -> f64 {
        match result {
            EpisodeResult::LearnerWin => self.win,
            EpisodeResult::OpponentWin => self.loss,
            EpisodeResult::Draw => self.draw,
        }
    }

    /// Reward for the opponent
    pub fn for_opponent(&self, result: EpisodeResult) -> f64 {
        match result {
            EpisodeResult::LearnerWin => self.loss,
            EpisodeResult::OpponentWin => self.win,
            EpisodeResult::Draw => self.draw,
        }
    }
}

/// Which mark the learner plays in each episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleAssignment {
    /// The learner always plays `learner`
    Fixed { learner: Player },
    /// The learner starts as `learner_starts`; after a decisive game the
    /// winner plays O (moves second) next, after a draw nothing changes
    WinnerMovesSecond { learner_starts: Player },
}

impl Default for RoleAssignment {
    fn default() -> Self {
        RoleAssignment::Fixed { learner: Player::X }
    }
}

impl RoleAssignment {
    /// Learner's mark in the first episode
    pub fn initial_mark(&self) -> Player {
        match *self {
            RoleAssignment::Fixed { learner } => learner,
            RoleAssignment::WinnerMovesSecond { learner_starts } => learner_starts,
        }
    }

    /// Learner's mark in the episode after one that ended with `result`
    pub fn next_mark(&self, current: Player, result: EpisodeResult) -> Player {
        match *self {
            RoleAssignment::Fixed { learner } => learner,
            RoleAssignment::WinnerMovesSecond { .. } => match result {
                EpisodeResult::LearnerWin => Player::O,
                EpisodeResult::OpponentWin => Player::X,
                EpisodeResult::Draw => current,
            },
        }
    }

    /// The three experiment rules: random moves first, learner moves first,
    /// winner moves second. Returns `None` for any other number.
    pub fn rule(number: usize) -> Option<Self> {
        match number {
            1 => Some(RoleAssignment::Fixed { learner: Player::O }),
            2 => Some(RoleAssignment::Fixed { learner: Player::X }),
            3 => Some(RoleAssignment::WinnerMovesSecond {
                learner_starts: Player::X,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for RoleAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleAssignment::Fixed { learner } => write!(f, "fixed, learner plays {learner}"),
            RoleAssignment::WinnerMovesSecond { learner_starts } => {
                write!(f, "winner moves second, learner starts as {learner_starts}")
            }
        }
    }
}

/// Experiment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Side length of the board
    pub board_size: usize,

    /// Number of episodes to play
    pub num_episodes: usize,

    /// Emit an interval report every this many episodes
    pub report_interval: usize,

    pub rewards: Rewards,

    pub role_assignment: RoleAssignment,

    /// Random seed; the learner gets `seed`, the opponent `seed + 1`
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            num_episodes: 100_000,
            report_interval: 10_000,
            rewards: Rewards::default(),
            role_assignment: RoleAssignment::default(),
            seed: None,
        }
    }
}

impl ExperimentConfig {
    /// Reject configurations that cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero board size, zero
    /// episodes or a zero report interval.
    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 {
            return Err(Error::config("board_size must be at least 1"));
        }
        if self.num_episodes == 0 {
            return Err(Error::config("num_episodes must be > 0"));
        }
        if self.report_interval == 0 {
            return Err(Error::config("report_interval must be > 0"));
        }
        Ok(())
    }
}

/// Everything observers learn about one finished episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode index (0-based)
    pub episode: usize,
    pub learner_mark: Player,
    pub outcome: GameOutcome,
    pub result: EpisodeResult,
    pub moves: Vec<Move>,
}

/// Result of an experiment run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub learner: String,
    pub opponent: String,
    pub board_size: usize,
    pub total_episodes: usize,
    pub totals: OutcomeCounts,
    pub learner_win_rate: f64,
    pub draw_rate: f64,
    pub opponent_win_rate: f64,
    /// Wins by the X mark
    pub x_wins: usize,
    /// Wins by the O mark
    pub o_wins: usize,
    /// Episodes in which the learner moved first
    pub learner_as_x: usize,
    pub intervals: Vec<IntervalReport>,
    /// Learned (state, action) values, for agents that keep a table
    pub value_table_size: Option<usize>,
}

impl ExperimentResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open {}", path.display()),
            source,
        })?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Runs batches of episodes between a learner and an opponent
pub struct ExperimentHarness {
    config: ExperimentConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl ExperimentHarness {
    pub fn new(config: ExperimentConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the harness
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Play `num_episodes` episodes, rewarding both agents after each one.
    ///
    /// Roles are decided per episode by the configured [`RoleAssignment`].
    /// Every `report_interval` episodes the interval counts are reported to
    /// observers and reset; a trailing partial interval is only reflected in
    /// the totals.
    ///
    /// # Errors
    ///
    /// Fails before the first episode if the configuration is invalid. Any
    /// engine error while driving a game aborts the run, as does an agent
    /// that returns no move while the game is ongoing.
    pub fn run(
        &mut self,
        learner: &mut dyn Agent,
        opponent: &mut dyn Agent,
    ) -> Result<ExperimentResult> {
        self.config.validate()?;
        self.seed_pair(learner, opponent)?;

        let total = self.config.num_episodes;
        let interval = self.config.report_interval;
        let rewards = self.config.rewards;
        let assignment = self.config.role_assignment;

        info!(
            learner = learner.name(),
            opponent = opponent.name(),
            board_size = self.config.board_size,
            episodes = total,
            ?assignment,
            "experiment started"
        );
        for observer in &mut self.observers {
            observer.on_run_start(total, learner.name(), opponent.name())?;
        }

        let mut tally = OutcomeTally::new();
        let mut intervals = Vec::with_capacity(total / interval);
        let mut learner_mark = assignment.initial_mark();

        for episode in 0..total {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }
            learner.begin_episode();
            opponent.begin_episode();

            let (outcome, moves) = self.play_episode(episode, learner, opponent, learner_mark)?;
            let result = tally.record(outcome, learner_mark);

            learner.update_from_result(rewards.for_learner(result))?;
            opponent.update_from_result(rewards.for_opponent(result))?;
            debug!(episode, %learner_mark, ?result, moves = moves.len(), "episode finished");

            let record = EpisodeRecord {
                episode,
                learner_mark,
                outcome,
                result,
                moves,
            };
            for observer in &mut self.observers {
                observer.on_episode_end(&record)?;
            }

            if (episode + 1) % interval == 0 {
                let report = tally.close_interval(learner.name(), opponent.name());
                info!(
                    episode = report.episode,
                    learner_win_rate = report.counts.learner_win_rate(),
                    draw_rate = report.counts.draw_rate(),
                    opponent_win_rate = report.counts.opponent_win_rate(),
                    "interval"
                );
                for observer in &mut self.observers {
                    observer.on_interval(&report)?;
                }
                intervals.push(report);
            }

            learner_mark = assignment.next_mark(learner_mark, result);
        }

        for observer in &mut self.observers {
            observer.on_run_end(&tally)?;
        }

        let totals = *tally.totals();
        info!(
            learner_wins = totals.learner_wins,
            draws = totals.draws,
            opponent_wins = totals.opponent_wins,
            "experiment finished"
        );

        Ok(ExperimentResult {
            learner: learner.name().to_string(),
            opponent: opponent.name().to_string(),
            board_size: self.config.board_size,
            total_episodes: tally.episodes(),
            totals,
            learner_win_rate: totals.learner_win_rate(),
            draw_rate: totals.draw_rate(),
            opponent_win_rate: totals.opponent_win_rate(),
            x_wins: tally.x_wins(),
            o_wins: tally.o_wins(),
            learner_as_x: tally.learner_as_x(),
            intervals,
            value_table_size: learner.value_table_size(),
        })
    }

    fn seed_pair(&self, learner: &mut dyn Agent, opponent: &mut dyn Agent) -> Result<()> {
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }

    fn play_episode(
        &mut self,
        episode: usize,
        learner: &mut dyn Agent,
        opponent: &mut dyn Agent,
        learner_mark: Player,
    ) -> Result<(GameOutcome, Vec<Move>)> {
        let mut engine = GameEngine::new(self.config.board_size)?;
        let mut step = 0;

        let outcome = loop {
            let player = match (engine.outcome(), engine.next_player()) {
                (Some(outcome), _) => break outcome,
                (None, Some(player)) => player,
                (None, None) => return Err(Error::GameAlreadyOver),
            };

            let agent: &mut dyn Agent = if player == learner_mark {
                &mut *learner
            } else {
                &mut *opponent
            };

            let position = agent
                .choose_move(engine.board())
                .ok_or_else(|| Error::NoValidMoves {
                    agent: agent.name().to_string(),
                })?;
            engine.play(player, position)?;
            trace!(episode, step, %player, %position, "move");

            let mv = Move { player, position };
            for observer in &mut self.observers {
                observer.on_move(episode, step, mv, engine.board())?;
            }
            step += 1;
        };

        Ok((outcome, engine.moves().to_vec()))
    }
}
