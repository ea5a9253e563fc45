//! Ports (trait boundaries) between the experiment harness and its players
//! and observers.
//!
//! The harness only talks to these traits, so learning and non-learning
//! agents, and any number of observation sinks, plug in interchangeably.

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::Observer;
