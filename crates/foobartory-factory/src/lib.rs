//! Simulation core for the Foobartory micro-economy.
//!
//! One [`Factory`] owns all shared mutable state of a simulation instance:
//! three material [`Stock`]s, a money [`Ledger`], the simulated [`Clock`],
//! an ordered robot registry, and the [`EventHub`] that notifies
//! subscribers of every state change. [`Robot`]s perform timed operations
//! against the factory; the factory is the sole mutation point.
//!
//! # Concurrency
//!
//! Scheduling is cooperative: every timed wait is a tokio suspension
//! point, so many robots' operations interleave within one simulation
//! instance. Interior locks are held only across synchronous sections and
//! are always released before an event is published. Precondition checks
//! performed after a move are deliberately not atomic with the later
//! consumption; a robot that loses that race completes its operation as a
//! no-op (the "someone got there first" rule).
//!
//! # Modules
//!
//! - [`stock`] -- Generic per-material stock container
//! - [`ledger`] -- Money balance with validated deposits and withdrawals
//! - [`clock`] -- Cumulative simulated time and scaled real waits
//! - [`hub`] -- Synchronous, subscription-ordered event dispatch
//! - [`robot`] -- The robot state machine and its five operations
//! - [`factory`] -- The resource and event aggregate
//! - [`config`] -- World parameters (durations, prices, ratios)
//! - [`names`] -- Generated robot monikers
//! - [`random`] -- Uniform-draw to inclusive-integer-range mapping

pub mod clock;
pub mod config;
pub mod error;
pub mod factory;
pub mod hub;
pub mod ledger;
pub mod names;
pub mod random;
pub mod robot;
pub mod stock;

pub use clock::Clock;
pub use config::WorldConfig;
pub use error::FactoryError;
pub use factory::Factory;
pub use hub::{EventHub, EventKind, FactoryEvent};
pub use ledger::{Ledger, LedgerError};
pub use names::generate_moniker;
pub use random::{random_int_inclusive, unit_to_int_inclusive};
pub use robot::{CraftOutcome, RandomCraftOutcome, Robot};
pub use stock::{Stock, StockError};
