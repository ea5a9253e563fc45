//! Train command - Q-learning agent against a random opponent

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};

use crate::{
    cli::{config::ExperimentFile, output},
    pipeline::{
        ExperimentConfig, ExperimentHarness, ExperimentResult, IntervalPrinter, JsonlObserver,
        ProgressObserver, RandomAgent, RoleAssignment,
    },
    q_learning::{QLearningAgent, QLearningConfig},
    tictactoe::Player,
};

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" => Ok(Player::X),
        "o" | "second" | "player2" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("experiment_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AssignmentArg {
    /// The learner keeps the same mark every episode
    Fixed,
    /// The winner of an episode moves second in the next one
    WinnerSecond,
}

#[derive(Parser, Debug, Default)]
#[command(about = "Train a Q-learning agent against a random opponent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// TOML experiment file; flags below override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of episodes
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Episodes per progress report
    #[arg(long, short = 'i')]
    pub interval: Option<usize>,

    /// Board side length
    #[arg(long, short = 'n')]
    pub size: Option<usize>,

    /// Role assignment policy
    #[arg(long, value_enum)]
    pub assignment: Option<AssignmentArg>,

    /// Mark the learner plays (fixed) or starts with (winner-second): `x` or `o`
    #[arg(long)]
    pub learner_player: Option<String>,

    /// Learning rate α (0.0-1.0]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration rate ε (0.0-1.0)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Multiplicative ε decay per episode
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Minimum ε under decay
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Reward for a win
    #[arg(long)]
    pub win: Option<f64>,

    /// Reward for a loss
    #[arg(long)]
    pub loss: Option<f64>,

    /// Reward for a draw
    #[arg(long)]
    pub draw: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL episode records
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Show a progress bar instead of interval lines
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

impl TrainArgs {
    /// Merge the optional config file with the command-line overrides
    pub fn resolve(&self) -> Result<(ExperimentConfig, QLearningConfig)> {
        let file = match &self.config {
            Some(path) => ExperimentFile::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ExperimentFile::default(),
        };
        let mut experiment = file.experiment;
        let mut agent = file.agent;

        if let Some(games) = self.games {
            experiment.num_episodes = games;
        }
        if let Some(interval) = self.interval {
            experiment.report_interval = interval;
        }
        if let Some(size) = self.size {
            experiment.board_size = size;
        }
        if let Some(seed) = self.seed {
            experiment.seed = Some(seed);
        }
        if let Some(win) = self.win {
            experiment.rewards.win = win;
        }
        if let Some(loss) = self.loss {
            experiment.rewards.loss = loss;
        }
        if let Some(draw) = self.draw {
            experiment.rewards.draw = draw;
        }

        let learner_mark = match &self.learner_player {
            Some(token) => parse_player_token(token, "--learner-player")?,
            None => experiment.role_assignment.initial_mark(),
        };
        experiment.role_assignment = match self.assignment {
            Some(AssignmentArg::Fixed) => RoleAssignment::Fixed {
                learner: learner_mark,
            },
            Some(AssignmentArg::WinnerSecond) => RoleAssignment::WinnerMovesSecond {
                learner_starts: learner_mark,
            },
            None => match experiment.role_assignment {
                RoleAssignment::Fixed { .. } => RoleAssignment::Fixed {
                    learner: learner_mark,
                },
                RoleAssignment::WinnerMovesSecond { .. } => RoleAssignment::WinnerMovesSecond {
                    learner_starts: learner_mark,
                },
            },
        };

        if let Some(alpha) = self.alpha {
            agent.learning_rate = alpha;
        }
        if let Some(gamma) = self.gamma {
            agent.discount_factor = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            agent.epsilon = epsilon;
        }
        if let Some(decay) = self.epsilon_decay {
            agent.epsilon_decay = decay;
        }
        if let Some(min_epsilon) = self.min_epsilon {
            agent.min_epsilon = min_epsilon;
        }

        experiment.validate()?;
        agent.validate()?;
        Ok((experiment, agent))
    }
}

/// Run one experiment and return its result; shared by `train` and `rules`
pub(crate) fn run_experiment(
    experiment: ExperimentConfig,
    agent_config: QLearningConfig,
    progress: bool,
    observations: Option<&Path>,
) -> Result<ExperimentResult> {
    let mut learner = QLearningAgent::new(agent_config)?;
    let mut opponent = RandomAgent::new("random");

    let mut harness = ExperimentHarness::new(experiment);
    harness = if progress {
        harness.with_observer(Box::new(ProgressObserver::new()))
    } else {
        harness.with_observer(Box::new(IntervalPrinter::new()))
    };
    if let Some(path) = observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("creating observations file {}", path.display()))?;
        harness = harness.with_observer(Box::new(observer));
    }

    let result = harness
        .run(&mut learner, &mut opponent)
        .context("experiment run failed")?;

    if progress {
        output::print_intervals(&result);
        output::print_final_totals(&result);
    }
    Ok(result)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let (experiment, agent) = args.resolve()?;

    let summary_path = args.summary.as_deref().map(sanitize_summary_path);
    if let (Some(raw), Some(sanitized)) = (&args.summary, &summary_path) {
        if raw != sanitized {
            println!("Summary will be written to {}", sanitized.display());
        }
    }

    output::print_section("Q-learning vs random");
    let size = experiment.board_size.to_string();
    let episodes = output::format_number(experiment.num_episodes);
    let assignment = experiment.role_assignment.to_string();
    let params = format!(
        "α={} γ={} ε={}",
        agent.learning_rate, agent.discount_factor, agent.epsilon
    );
    output::print_stats_table(&[
        ("board size", &size),
        ("episodes", &episodes),
        ("assignment", &assignment),
        ("parameters", &params),
    ]);
    println!();

    let result = run_experiment(experiment, agent, args.progress, args.observations.as_deref())?;
    output::print_experiment_details(&result);

    if let Some(path) = summary_path {
        result
            .save(&path)
            .with_context(|| format!("writing summary {}", path.display()))?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
