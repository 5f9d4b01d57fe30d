//! Evolutionary trainer for foobartory policies.
//!
//! The trainer breeds a population of decision policies over
//! generations. Every generation, each population member gets a fully
//! independent factory and a run loop of its own; all members run
//! concurrently and are raced against one shared real-time deadline.
//! Members are scored from their factory's final state, the best
//! fraction survives unchanged, and the remaining slots are filled by
//! roulette-wheel-selected parents crossed over and mutated.

pub mod config;
pub mod error;
pub mod fitness;
pub mod trainer;

pub use config::TrainerConfig;
pub use error::TrainerError;
pub use fitness::{fitness, roulette_index};
pub use trainer::{GenerationReport, IndividualReport, Trainer};
