//! A particle simulation of disease spreading through a bounded population.
//!
//! Individuals are discs moving in straight lines across a rectangular arena, bouncing off its
//! walls. A sick individual infects every healthy individual it touches. After a fixed number
//! of ticks a sick individual either recovers or, if vulnerable, dies. Part of the population
//! can be quarantined, which means it never moves.
//!
//! The crate is organized around a few pieces:
//! * [`individual`]: one person, their health state machine and motion.
//! * [`population`]: the ordered set of individuals and the per-tick pass over them.
//! * [`history`]: a bounded series of state counts, one sample per tick.
//! * [`chart`]: the stacked columns of the cumulative chart drawn from that history.
//! * [`simulation`]: run control tying a population to its history, with optional CSV
//!   [`report`]s.
//!
//! A run is reproducible from its seed: all randomness comes from named streams in
//! [`random`], and only population construction draws from them.
pub mod chart;
pub mod error;
pub mod execution_stats;
pub mod geometry;
pub mod hashing;
pub mod history;
pub mod individual;
pub mod log;
pub mod parameters;
pub mod population;
pub mod prelude;
#[cfg(feature = "progress_bar")]
pub mod progress;
pub mod random;
pub mod report;
pub mod runner;
pub mod simulation;

pub use crate::error::OutbreakError;
pub use crate::runner::{run_with_args, BaseArgs};
pub use crate::simulation::Simulation;

// Re-exported for use in macros.
pub use csv;
pub use paste;
pub use rand;
