//! Tabular Q-learning
//!
//! A [`QLearningAgent`] keeps a sparse [`QTable`] keyed by exact board
//! contents, picks moves ε-greedily and learns once per episode from the
//! terminal reward.
//!
//! ## Update rule
//!
//! At the end of an episode the recorded trajectory is replayed from the last
//! move backwards:
//!
//! | Step            | Target                    |
//! |-----------------|---------------------------|
//! | last move       | `reward`                  |
//! | any earlier one | `γ · Q(next pair played)` |
//!
//! each moved by `α` toward its target.
//!
//! ## Usage Example
//!
//! ```no_run
//! use qtoe::q_learning::{QLearningAgent, QLearningConfig};
//!
//! let agent = QLearningAgent::new(QLearningConfig {
//!     learning_rate: 0.3,
//!     discount_factor: 0.9,
//!     epsilon: 0.2,
//!     ..QLearningConfig::default()
//! })
//! .expect("valid config")
//! .with_seed(42);
//! ```

pub mod agent;
pub mod q_table;

pub use agent::{EpisodeHistory, QLearningAgent, QLearningConfig};
pub use q_table::QTable;
