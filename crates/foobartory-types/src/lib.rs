//! Shared type definitions for the Foobartory simulation.
//!
//! This crate is the single source of truth for the leaf types used across
//! the Foobartory workspace: material kinds and their typed quantities,
//! robot workstations and availability status, the five operation kinds a
//! strategy can choose from, and the read-only factory status snapshot.
//!
//! # Modules
//!
//! - [`material`] -- Material kind markers (`Foo`, `Bar`, `Foobar`)
//! - [`quantity`] -- Non-negative, kind-tagged integer quantities
//! - [`workstation`] -- Robot locations and availability status
//! - [`operation`] -- The five operation kinds, in policy output order
//! - [`status`] -- Read-only factory status snapshot

pub mod material;
pub mod operation;
pub mod quantity;
pub mod status;
pub mod workstation;

// Re-export all public types at crate root for convenience.
pub use material::{Bar, Foo, Foobar, Material};
pub use operation::Operation;
pub use quantity::Quantity;
pub use status::FactoryStatus;
pub use workstation::{RobotStatus, Workstation};
