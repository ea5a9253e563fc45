//! Rules command - the three fixed experiment rules, each with a fresh agent

use anyhow::{Result, anyhow};
use clap::Parser;

use super::train::run_experiment;
use crate::{
    cli::output,
    pipeline::{ExperimentConfig, ExperimentResult, RoleAssignment},
    q_learning::QLearningConfig,
};

const RULE_TITLES: [&str; 3] = [
    "Rule 1: random moves first, learner second",
    "Rule 2: learner moves first, random second",
    "Rule 3: winner moves second in the next episode",
];

#[derive(Parser, Debug)]
#[command(about = "Run the three experiment rules back to back")]
pub struct RulesArgs {
    /// Episodes per rule
    #[arg(long, short = 'g', default_value_t = 100_000)]
    pub games: usize,

    /// Episodes per progress report
    #[arg(long, short = 'i', default_value_t = 10_000)]
    pub interval: usize,

    /// Board side length
    #[arg(long, short = 'n', default_value_t = 3)]
    pub size: usize,

    /// Run a single rule (1, 2 or 3) instead of all three
    #[arg(long)]
    pub rule: Option<usize>,

    /// Random seed; every rule starts from the same seed
    #[arg(long)]
    pub seed: Option<u64>,
}

fn selected_rules(rule: Option<usize>) -> Result<Vec<usize>> {
    match rule {
        None => Ok(vec![1, 2, 3]),
        Some(n @ 1..=3) => Ok(vec![n]),
        Some(other) => Err(anyhow!("Unknown rule {other} (expected 1, 2 or 3)")),
    }
}

pub fn execute(args: RulesArgs) -> Result<()> {
    let rules = selected_rules(args.rule)?;
    let mut results: Vec<(usize, ExperimentResult)> = Vec::with_capacity(rules.len());

    for number in rules {
        let role_assignment = RoleAssignment::rule(number)
            .ok_or_else(|| anyhow!("Unknown rule {number}"))?;
        let experiment = ExperimentConfig {
            board_size: args.size,
            num_episodes: args.games,
            report_interval: args.interval,
            role_assignment,
            seed: args.seed,
            ..ExperimentConfig::default()
        };

        output::print_section(RULE_TITLES[number - 1]);
        let result = run_experiment(experiment, QLearningConfig::default(), false, None)?;
        results.push((number, result));
    }

    if results.len() > 1 {
        output::print_section("All rules");
        for (number, result) in &results {
            println!(
                "  rule {number}: learner-win={}, draw={}, random-win={}",
                output::format_percent(result.learner_win_rate),
                output::format_percent(result.draw_rate),
                output::format_percent(result.opponent_win_rate),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_rules() {
        assert_eq!(selected_rules(None).unwrap(), vec![1, 2, 3]);
        assert_eq!(selected_rules(Some(2)).unwrap(), vec![2]);
        assert!(selected_rules(Some(0)).is_err());
        assert!(selected_rules(Some(4)).is_err());
    }
}
