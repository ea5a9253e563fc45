//! Outcome counting for experiment runs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{GameOutcome, Player};

/// Outcome of one episode from the learner's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeResult {
    LearnerWin,
    Draw,
    OpponentWin,
}

impl EpisodeResult {
    pub fn from_outcome(outcome: GameOutcome, learner_mark: Player) -> Self {
        match outcome {
            GameOutcome::Win(winner) if winner == learner_mark => EpisodeResult::LearnerWin,
            GameOutcome::Win(_) => EpisodeResult::OpponentWin,
            GameOutcome::Draw => EpisodeResult::Draw,
        }
    }
}

/// Learner wins, draws and opponent wins over some span of episodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub learner_wins: usize,
    pub draws: usize,
    pub opponent_wins: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, result: EpisodeResult) {
        match result {
            EpisodeResult::LearnerWin => self.learner_wins += 1,
            EpisodeResult::Draw => self.draws += 1,
            EpisodeResult::OpponentWin => self.opponent_wins += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.learner_wins + self.draws + self.opponent_wins
    }

    pub fn learner_win_rate(&self) -> f64 {
        rate(self.learner_wins, self.total())
    }

    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.total())
    }

    pub fn opponent_win_rate(&self) -> f64 {
        rate(self.opponent_wins, self.total())
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Interval-local counts emitted every `report_interval` episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalReport {
    /// Episodes completed when the interval closed
    pub episode: usize,
    /// Learner's name, used as its role label
    pub learner: String,
    /// Opponent's name, used as its role label
    pub opponent: String,
    pub counts: OutcomeCounts,
}

impl fmt::Display for IntervalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>7}: {}-win={:5.1}%, draw={:5.1}%, {}-win={:5.1}%",
            self.episode,
            self.learner,
            self.counts.learner_win_rate() * 100.0,
            self.counts.draw_rate() * 100.0,
            self.opponent,
            self.counts.opponent_win_rate() * 100.0,
        )
    }
}

/// Running totals for one experiment run.
///
/// Totals only ever grow. The interval counters are reset each time an
/// interval is closed with [`OutcomeTally::close_interval`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    totals: OutcomeCounts,
    interval: OutcomeCounts,
    x_wins: usize,
    o_wins: usize,
    learner_as_x: usize,
}

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished episode
    pub fn record(&mut self, outcome: GameOutcome, learner_mark: Player) -> EpisodeResult {
        let result = EpisodeResult::from_outcome(outcome, learner_mark);
        self.totals.record(result);
        self.interval.record(result);
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => {}
        }
        if learner_mark == Player::X {
            self.learner_as_x += 1;
        }
        result
    }

    /// Emit the current interval's counts and start a new interval
    pub fn close_interval(&mut self, learner: &str, opponent: &str) -> IntervalReport {
        let report = IntervalReport {
            episode: self.episodes(),
            learner: learner.to_string(),
            opponent: opponent.to_string(),
            counts: self.interval,
        };
        self.interval = OutcomeCounts::default();
        report
    }

    /// Episodes counted so far
    pub fn episodes(&self) -> usize {
        self.totals.total()
    }

    pub fn totals(&self) -> &OutcomeCounts {
        &self.totals
    }

    /// Counts since the last closed interval
    pub fn interval(&self) -> &OutcomeCounts {
        &self.interval
    }

    /// Wins by the X mark, whoever held it
    pub fn x_wins(&self) -> usize {
        self.x_wins
    }

    /// Wins by the O mark, whoever held it
    pub fn o_wins(&self) -> usize {
        self.o_wins
    }

    /// Episodes in which the learner moved first
    pub fn learner_as_x(&self) -> usize {
        self.learner_as_x
    }
}
