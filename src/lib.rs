//! Tabular Q-learning on N×N Tic-Tac-Toe
//!
//! This crate provides:
//! - An N×N Tic-Tac-Toe engine with move validation and early draw detection
//! - A tabular Q-learning agent with ε-greedy play and backward credit assignment
//! - An experiment harness pitting the learner against a random opponent
//! - Observers and a CLI for running and reporting experiments

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use types::{Position, StateKey};
