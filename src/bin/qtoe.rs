//! qtoe CLI - Q-learning experiments on N×N Tic-Tac-Toe
//!
//! This CLI provides:
//! - Training a Q-learning agent against a random opponent
//! - Replaying the three fixed experiment rules
//! - Measuring the random-vs-random baseline

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qtoe")]
#[command(version, about = "Q-learning experiments on N×N Tic-Tac-Toe", long_about = None)]
struct Cli {
    /// Log debug events to stderr (RUST_LOG is honoured otherwise)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent against a random opponent
    Train(Box<qtoe::cli::commands::train::TrainArgs>),

    /// Run the three experiment rules with fresh agents
    Rules(qtoe::cli::commands::rules::RulesArgs),

    /// Measure random vs random first-mover statistics
    Baseline(qtoe::cli::commands::baseline::BaselineArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => qtoe::cli::commands::train::execute(*args),
        Commands::Rules(args) => qtoe::cli::commands::rules::execute(args),
        Commands::Baseline(args) => qtoe::cli::commands::baseline::execute(args),
    }
}
