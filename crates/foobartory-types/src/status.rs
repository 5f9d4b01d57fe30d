//! Read-only factory status snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time view of a factory's shared resources.
///
/// Produced by `Factory::status` with no side effects; consumed by
/// strategies when deciding, by the trainer when scoring, and by the
/// console presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryStatus {
    /// Current bank balance. May be negative (the ledger does not guard
    /// withdrawals).
    pub balance: Decimal,
    /// Foo units in stock.
    pub foo: u32,
    /// Bar units in stock.
    pub bar: u32,
    /// Foobar units in stock.
    pub foobar: u32,
    /// Number of robots registered with the factory.
    pub robot_count: usize,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
