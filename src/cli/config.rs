//! Experiment configuration files for CLI commands
//!
//! A TOML file with two optional tables:
//!
//! ```toml
//! [experiment]
//! board_size = 3
//! num_episodes = 100000
//! report_interval = 10000
//! seed = 7
//! rewards = { win = 1.0, loss = -1.0, draw = 0.2 }
//! role_assignment = { kind = "winner_moves_second", learner_starts = "X" }
//!
//! [agent]
//! learning_rate = 0.3
//! discount_factor = 0.9
//! epsilon = 0.2
//! ```
//!
//! Missing keys take their defaults; command-line flags override the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, pipeline::ExperimentConfig, q_learning::QLearningConfig,
};

/// Contents of an experiment configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentFile {
    pub experiment: ExperimentConfig,
    pub agent: QLearningConfig,
}

impl ExperimentFile {
    /// Load and parse a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read {}", path.display()),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pipeline::RoleAssignment, tictactoe::Player};

    #[test]
    fn test_empty_file_is_default() {
        let file = ExperimentFile::from_toml_str("").unwrap();
        assert_eq!(file, ExperimentFile::default());
        assert_eq!(file.experiment.num_episodes, 100_000);
        assert_eq!(file.agent.learning_rate, 0.3);
    }

    #[test]
    fn test_partial_tables() {
        let file = ExperimentFile::from_toml_str(
            r#"
            [experiment]
            board_size = 4
            seed = 9
            rewards = { draw = 0.5 }
            role_assignment = { kind = "winner_moves_second", learner_starts = "O" }

            [agent]
            epsilon = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(file.experiment.board_size, 4);
        assert_eq!(file.experiment.seed, Some(9));
        assert_eq!(file.experiment.report_interval, 10_000);
        assert_eq!(file.experiment.rewards.draw, 0.5);
        assert_eq!(file.experiment.rewards.win, 1.0);
        assert_eq!(
            file.experiment.role_assignment,
            RoleAssignment::WinnerMovesSecond {
                learner_starts: Player::O
            }
        );
        assert_eq!(file.agent.epsilon, 0.05);
        assert_eq!(file.agent.discount_factor, 0.9);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ExperimentFile::from_toml_str("[experiment]\nboard_size = \"big\""),
            Err(Error::ConfigParse(_))
        ));
    }
}
