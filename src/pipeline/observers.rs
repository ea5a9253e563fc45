//! Observer implementations for experiment runs
//!
//! Observers allow composable data collection during a run without coupling
//! the harness loop to specific output formats.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::{
    experiment::EpisodeRecord,
    tally::{EpisodeResult, IntervalReport, OutcomeTally},
};
use crate::{Error, Result, ports::Observer, tictactoe::Player};

/// Interval printer - the operator-facing progress lines and final summary
pub struct IntervalPrinter<W: Write + Send = io::Stdout> {
    out: W,
    learner: String,
    opponent: String,
}

impl IntervalPrinter {
    /// Print to stdout
    pub fn new() -> Self {
        Self::to_writer(io::stdout())
    }
}

impl Default for IntervalPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> IntervalPrinter<W> {
    pub fn to_writer(out: W) -> Self {
        Self {
            out,
            learner: String::new(),
            opponent: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, label: &str, count: usize, share: f64) -> Result<()> {
        writeln!(self.out, "  {label}: {count} ({:.2}%)", share * 100.0)?;
        Ok(())
    }
}

impl<W: Write + Send> Observer for IntervalPrinter<W> {
    fn on_run_start(&mut self, total_episodes: usize, learner: &str, opponent: &str) -> Result<()> {
        self.learner = learner.to_string();
        self.opponent = opponent.to_string();
        writeln!(
            self.out,
            "{learner} vs {opponent}, {total_episodes} episodes"
        )?;
        Ok(())
    }

    fn on_interval(&mut self, report: &IntervalReport) -> Result<()> {
        writeln!(self.out, "{report}")?;
        Ok(())
    }

    fn on_run_end(&mut self, tally: &OutcomeTally) -> Result<()> {
        let totals = *tally.totals();
        writeln!(self.out, "{}", "-".repeat(60))?;
        writeln!(self.out, "final ({} episodes):", tally.episodes())?;
        let learner_label = format!("{}-win", self.learner);
        let opponent_label = format!("{}-win", self.opponent);
        self.write_line(&learner_label, totals.learner_wins, totals.learner_win_rate())?;
        self.write_line("draw", totals.draws, totals.draw_rate())?;
        self.write_line(&opponent_label, totals.opponent_wins, totals.opponent_win_rate())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Progress bar observer - Shows run progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize, _learner: &str, _opponent: &str) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        match record.result {
            EpisodeResult::LearnerWin => self.wins += 1,
            EpisodeResult::Draw => self.draws += 1,
            EpisodeResult::OpponentWin => self.losses += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(record.episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self, _tally: &OutcomeTally) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks episode lengths and learner results
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    wins_as_x: usize,
    wins_as_o: usize,
    total_moves: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_episodes(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        self.share(self.wins)
    }

    /// Get current draw rate
    pub fn draw_rate(&self) -> f64 {
        self.share(self.draws)
    }

    /// Get current loss rate
    pub fn loss_rate(&self) -> f64 {
        self.share(self.losses)
    }

    /// Get average episode length in moves
    pub fn avg_game_length(&self) -> f64 {
        self.share(self.total_moves)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            wins_as_x: self.wins_as_x,
            wins_as_o: self.wins_as_o,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }

    fn share(&self, count: usize) -> f64 {
        let total = self.total_episodes();
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }
}

/// Summary of learner metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub wins_as_x: usize,
    pub wins_as_o: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        self.total_moves += record.moves.len();
        match record.result {
            EpisodeResult::LearnerWin => {
                self.wins += 1;
                match record.learner_mark {
                    Player::X => self.wins_as_x += 1,
                    Player::O => self.wins_as_o += 1,
                }
            }
            EpisodeResult::Draw => self.draws += 1,
            EpisodeResult::OpponentWin => self.losses += 1,
        }
        Ok(())
    }
}

/// JSONL observer - Exports one [`EpisodeRecord`] per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_run_end(&mut self, _tally: &OutcomeTally) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
