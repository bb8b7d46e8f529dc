//! Core data structures for the Pasture simulation.

pub mod agent;
pub mod perception;
pub mod stats;

pub use agent::*;
pub use perception::*;
pub use stats::*;
