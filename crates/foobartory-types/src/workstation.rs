//! Robot workstations and availability status.

use serde::{Deserialize, Serialize};

/// A robot's physical location inside the factory.
///
/// Every operation happens at a dedicated workstation; a robot that is
/// between workstations is at the transient [`Workstation::Moving`] marker
/// until the move completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Workstation {
    /// Foo mine.
    MiningFoo,
    /// Bar mine.
    MiningBar,
    /// Foobar assembly bench.
    CraftingFoobar,
    /// Foobar sales counter.
    SellingFoobar,
    /// Robot shop.
    BuyingRobot,
    /// In transit between two workstations.
    Moving,
}

impl Workstation {
    /// Stable numeric identifier, used as the last element of the policy
    /// state vector.
    pub const fn id(self) -> u8 {
        match self {
            Self::MiningFoo => 0,
            Self::MiningBar => 1,
            Self::CraftingFoobar => 2,
            Self::SellingFoobar => 3,
            Self::BuyingRobot => 4,
            Self::Moving => 5,
        }
    }
}

/// Whether a robot can accept a new operation.
///
/// A robot is [`RobotStatus::Busy`] exactly while an operation is in
/// flight; operations are not reentrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotStatus {
    /// Idle and ready for the next operation.
    Available,
    /// An operation is in flight.
    Busy,
}
