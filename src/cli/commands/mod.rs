//! CLI subcommands

pub mod baseline;
pub mod rules;
pub mod train;
