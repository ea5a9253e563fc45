//! Tabular Q-learning agent
//!
//! The agent records every (state, action) it plays during an episode and
//! assigns credit once, at the end, by replaying that trajectory backwards.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{
    error::{Error, Result},
    ports::Agent,
    q_learning::q_table::QTable,
    tictactoe::Board,
    types::{Position, StateKey},
};

/// Hyperparameters of a [`QLearningAgent`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// α, in (0, 1]
    pub learning_rate: f64,
    /// γ, in [0, 1]
    pub discount_factor: f64,
    /// ε, probability of a uniformly random move, in [0, 1]
    pub epsilon: f64,
    /// Multiplicative ε decay applied after every episode; 1.0 keeps ε fixed
    pub epsilon_decay: f64,
    /// Floor for ε under decay
    pub min_epsilon: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.3,
            discount_factor: 0.9,
            epsilon: 0.2,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
        }
    }
}

impl QLearningConfig {
    /// Check every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::config(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::config(format!(
                "discount_factor must be in [0, 1], got {}",
                self.discount_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::config(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon_decay) {
            return Err(Error::config(format!(
                "epsilon_decay must be in [0, 1], got {}",
                self.epsilon_decay
            )));
        }
        if !(0.0..=1.0).contains(&self.min_epsilon) {
            return Err(Error::config(format!(
                "min_epsilon must be in [0, 1], got {}",
                self.min_epsilon
            )));
        }
        if self.min_epsilon > self.epsilon {
            return Err(Error::config(format!(
                "min_epsilon ({}) must not exceed epsilon ({})",
                self.min_epsilon, self.epsilon
            )));
        }
        Ok(())
    }
}

/// Ordered (state, action) pairs played by the agent during one episode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeHistory {
    steps: Vec<(StateKey, Position)>,
}

impl EpisodeHistory {
    pub fn push(&mut self, state: StateKey, action: Position) {
        self.steps.push((state, action));
    }

    pub fn steps(&self) -> &[(StateKey, Position)] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    fn take(&mut self) -> Vec<(StateKey, Position)> {
        std::mem::take(&mut self.steps)
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent with ε-greedy move selection
///
/// Values are keyed by the exact board contents, so the agent learns
/// separately for each side it plays.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    name: String,
    config: QLearningConfig,
    q_table: QTable,
    history: EpisodeHistory,
    epsilon: f64,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent with an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` fails validation.
    pub fn new(config: QLearningConfig) -> Result<Self> {
        config.validate()?;
        if config.epsilon == 0.0 {
            warn!(
                "epsilon is 0 and the table is empty; greedy play picks the first empty cell \
                 until values are learned"
            );
        }
        Ok(Self {
            name: "q-learning".to_string(),
            config,
            q_table: QTable::new(),
            history: EpisodeHistory::default(),
            epsilon: config.epsilon,
            rng: build_rng(None),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Learned value of playing `action` in `state`, 0.0 if never updated
    pub fn q_value(&self, state: &StateKey, action: Position) -> f64 {
        self.q_table.get(state, action)
    }

    /// Moves recorded so far in the current episode
    pub fn history(&self) -> &EpisodeHistory {
        &self.history
    }

    /// Assign the terminal reward to the recorded trajectory.
    ///
    /// Walks the history from the last move to the first. The most recent
    /// pair is updated toward `reward`; every earlier pair is updated toward
    /// γ times the value just written for its successor in the trajectory:
    ///
    /// `Q(s,a) ← Q(s,a) + α[r + γ·next − Q(s,a)]`, with `next` starting at 0.0
    /// and `r` zeroed after the first step.
    ///
    /// This is a simplification of one-step Q-learning: the successor
    /// estimate comes from the next pair actually played, not from
    /// `max_a' Q(s', a')` over the successor board's row. The history is
    /// cleared and ε decayed afterwards.
    pub fn update_from_result(&mut self, reward: f64) {
        let alpha = self.config.learning_rate;
        let gamma = self.config.discount_factor;

        let mut reward = reward;
        let mut next_estimate = 0.0;
        for (state, action) in self.history.take().into_iter().rev() {
            let old = self.q_table.get(&state, action);
            let new = old + alpha * (reward + gamma * next_estimate - old);
            trace!(state = %state, action = %action, old, new, "q update");
            self.q_table.set(state, action, new);
            next_estimate = new;
            reward = 0.0;
        }

        self.decay_epsilon();
    }

    /// Decay epsilon after episode
    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
    }
}

impl Agent for QLearningAgent {
    fn choose_move(&mut self, board: &Board) -> Option<Position> {
        let candidates = board.empty_positions();
        if candidates.is_empty() {
            return None;
        }
        let state = board.state_key();

        let explore = self.rng.random::<f64>() < self.epsilon;
        let action = if explore {
            candidates.choose(&mut self.rng).copied()?
        } else {
            self.q_table.greedy_action(&state, &candidates)?
        };

        self.history.push(state, action);
        Some(action)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn begin_episode(&mut self) {
        self.history.clear();
    }

    fn update_from_result(&mut self, reward: f64) -> Result<()> {
        QLearningAgent::update_from_result(self, reward);
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        Ok(())
    }

    fn value_table_size(&self) -> Option<usize> {
        Some(self.q_table.entry_count())
    }
}
