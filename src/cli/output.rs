//! Output formatting for CLI

use crate::pipeline::{BaselineResult, ExperimentResult};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in [0, 1] as a percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, &str)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Print every interval report of a finished run
pub fn print_intervals(result: &ExperimentResult) {
    for report in &result.intervals {
        println!("{report}");
    }
}

/// Whole-run totals as the block `IntervalPrinter` ends a run with
pub fn format_final_totals(result: &ExperimentResult) -> String {
    let totals = &result.totals;
    let rows = [
        (format!("{}-win", result.learner), totals.learner_wins, result.learner_win_rate),
        ("draw".to_string(), totals.draws, result.draw_rate),
        (format!("{}-win", result.opponent), totals.opponent_wins, result.opponent_win_rate),
    ];
    let mut block = format!("final ({} episodes):", result.total_episodes);
    for (label, count, rate) in rows {
        block.push_str(&format!("\n  {label}: {count} ({})", format_percent(rate)));
    }
    block
}

/// Print the whole-run totals of a finished run
pub fn print_final_totals(result: &ExperimentResult) {
    println!("{}", "-".repeat(60));
    println!("{}", format_final_totals(result));
}

/// Print the per-mark breakdown and table size of a finished run
pub fn print_experiment_details(result: &ExperimentResult) {
    print_subsection("Details");
    let x_wins = format_number(result.x_wins);
    let o_wins = format_number(result.o_wins);
    let learner_as_x = format_number(result.learner_as_x);
    let table = result
        .value_table_size
        .map(format_number)
        .unwrap_or_else(|| "-".to_string());
    print_stats_table(&[
        ("X wins", &x_wins),
        ("O wins", &o_wins),
        ("learner moved first", &learner_as_x),
        ("learned values", &table),
    ]);
}

/// Print a random-vs-random baseline
pub fn print_baseline(result: &BaselineResult) {
    print_section(&format!(
        "Random vs random on {n}x{n}",
        n = result.board_size
    ));
    let games = format_number(result.total_games);
    let first = format!(
        "{} ({})",
        format_number(result.first_player_wins),
        format_percent(result.first_player_win_rate())
    );
    let second = format!(
        "{} ({})",
        format_number(result.second_player_wins),
        format_percent(result.second_player_win_rate())
    );
    let draws = format!(
        "{} ({})",
        format_number(result.draws),
        format_percent(result.draw_rate())
    );
    print_stats_table(&[
        ("games", &games),
        ("first player wins", &first),
        ("second player wins", &second),
        ("draws", &draws),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::OutcomeCounts;

    fn finished_run() -> ExperimentResult {
        ExperimentResult {
            learner: "q-learning".to_string(),
            opponent: "random".to_string(),
            board_size: 3,
            total_episodes: 200,
            totals: OutcomeCounts {
                learner_wins: 100,
                draws: 50,
                opponent_wins: 50,
            },
            learner_win_rate: 0.5,
            draw_rate: 0.25,
            opponent_win_rate: 0.25,
            x_wins: 100,
            o_wins: 50,
            learner_as_x: 200,
            intervals: Vec::new(),
            value_table_size: Some(339),
        }
    }

    #[test]
    fn test_format_final_totals() {
        assert_eq!(
            format_final_totals(&finished_run()),
            "final (200 episodes):\n  q-learning-win: 100 (50.00%)\n  draw: 50 (25.00%)\n  random-win: 50 (25.00%)"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(100_000), "100,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.7265), "72.65%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
