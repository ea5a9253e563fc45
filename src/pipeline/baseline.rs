//! Uniform random baseline agent and random-vs-random reference runs

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::experiment::{ExperimentConfig, ExperimentHarness, RoleAssignment};
use crate::{
    Result,
    ports::Agent,
    tictactoe::{Board, Player},
    types::Position,
};

/// Random agent (uniform choice among empty cells)
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new("random")
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, board: &Board) -> Option<Position> {
        let moves = board.empty_positions();
        if moves.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..moves.len());
        Some(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// First-mover statistics for two random agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineResult {
    pub board_size: usize,
    pub total_games: usize,
    pub first_player_wins: usize,
    pub second_player_wins: usize,
    pub draws: usize,
}

impl BaselineResult {
    pub fn first_player_win_rate(&self) -> f64 {
        self.share(self.first_player_wins)
    }

    pub fn second_player_win_rate(&self) -> f64 {
        self.share(self.second_player_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.share(self.draws)
    }

    fn share(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }
}

/// Play `num_games` random-vs-random games on a `board_size` board.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfiguration`] for zero games or a zero
/// board size.
pub fn run_random_baseline(
    board_size: usize,
    num_games: usize,
    seed: Option<u64>,
) -> Result<BaselineResult> {
    let config = ExperimentConfig {
        board_size,
        num_episodes: num_games,
        report_interval: num_games.max(1),
        role_assignment: RoleAssignment::Fixed {
            learner: Player::X,
        },
        seed,
        ..ExperimentConfig::default()
    };

    let mut first = RandomAgent::new("first");
    let mut second = RandomAgent::new("second");
    let result = ExperimentHarness::new(config).run(&mut first, &mut second)?;

    Ok(BaselineResult {
        board_size,
        total_games: result.total_episodes,
        first_player_wins: result.x_wins,
        second_player_wins: result.o_wins,
        draws: result.totals.draws,
    })
}
