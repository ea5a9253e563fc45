//! CLI infrastructure for the qtoe experiment toolkit
//!
//! This module provides the command-line interface for training a Q-learning
//! agent, replaying the fixed experiment rules and measuring the random
//! baseline.

pub mod commands;
pub mod config;
pub mod output;
