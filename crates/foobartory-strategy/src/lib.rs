//! Decision layer for the foobartory simulation.
//!
//! The factory never decides anything on its own: every time a robot
//! becomes available, something has to pick its next operation. That
//! something is a [`Decider`]. Three deciders live here:
//!
//! - [`HeuristicDecider`] — a fixed priority ladder (buy, sell, then
//!   mine or craft).
//! - [`RandomDecider`] — uniform pick over the five operation kinds.
//! - [`PolicyDecider`] — feeds an encoded state vector to an opaque
//!   [`Policy`] and takes the highest-scoring operation.
//!
//! [`run_until_goal`] is the shared run loop: it bridges the factory's
//! synchronous event hub into an async decision stream, dispatches one
//! spawned operation task per decision, and stops issuing work once the
//! robot-count goal is reached or the shared stop flag is raised.

pub mod decide;
pub mod neural;
pub mod policy;
pub mod runner;

pub use decide::{Decider, HeuristicDecider, RandomDecider};
pub use neural::PolicyDecider;
pub use policy::{OPERATION_COUNT, Policy, STATE_DIM, StateVector, encode_state};
pub use runner::{StopFlag, run_until_goal};
