//! Experiment pipeline
//!
//! This module provides:
//! - The experiment harness driving learner-vs-opponent episodes
//! - Outcome tallies and interval reports
//! - The random baseline agent
//! - Observers recording what happens during a run

pub mod baseline;
pub mod experiment;
pub mod observers;
pub mod tally;

pub use baseline::{BaselineResult, RandomAgent, run_random_baseline};
pub use experiment::{
    EpisodeRecord, ExperimentConfig, ExperimentHarness, ExperimentResult, Rewards, RoleAssignment,
};
// Re-export observer implementations (adapters)
pub use observers::{IntervalPrinter, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use tally::{EpisodeResult, IntervalReport, OutcomeCounts, OutcomeTally};

pub use crate::ports::{Agent, Observer};
