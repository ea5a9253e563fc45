//! Baseline command - random vs random reference statistics

use anyhow::{Context, Result};
use clap::Parser;

use crate::{cli::output, pipeline::run_random_baseline};

#[derive(Parser, Debug)]
#[command(about = "Play random against random and report first-mover statistics")]
pub struct BaselineArgs {
    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100_000)]
    pub games: usize,

    /// Board side length
    #[arg(long, short = 'n', default_value_t = 3)]
    pub size: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: BaselineArgs) -> Result<()> {
    let result = run_random_baseline(args.size, args.games, args.seed)
        .context("random baseline failed")?;
    output::print_baseline(&result);
    Ok(())
}
