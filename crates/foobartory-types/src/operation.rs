//! The five operation kinds a strategy can assign to a robot.

use serde::{Deserialize, Serialize};

/// An operation kind, in the order the policy provider scores them.
///
/// The discriminant order is part of the policy contract: the provider
/// returns one score per kind and the highest score wins, so the index of
/// each variant must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Mine one bar (variable duration).
    MineBar,
    /// Mine one foo (fixed duration).
    MineFoo,
    /// Craft one foobar from one foo and one bar (probabilistic outcome).
    CraftFoobar,
    /// Sell the requested number of foobars, bounded by the stock.
    SellFoobar,
    /// Buy a new robot for foo plus money.
    BuyRobot,
}

impl Operation {
    /// All operation kinds in score-vector order.
    pub const ALL: [Self; 5] = [
        Self::MineBar,
        Self::MineFoo,
        Self::CraftFoobar,
        Self::SellFoobar,
        Self::BuyRobot,
    ];

    /// Position of this kind in the policy score vector.
    pub const fn index(self) -> usize {
        match self {
            Self::MineBar => 0,
            Self::MineFoo => 1,
            Self::CraftFoobar => 2,
            Self::SellFoobar => 3,
            Self::BuyRobot => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (position, operation) in Operation::ALL.iter().enumerate() {
            assert_eq!(operation.index(), position);
        }
    }
}
