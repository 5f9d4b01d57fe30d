//! Operation deciders: the heuristic priority ladder and the uniform
//! random baseline.

use rand::Rng;
use rand::rngs::SmallRng;

use foobartory_factory::{WorldConfig, random_int_inclusive};
use foobartory_types::{FactoryStatus, Operation, Workstation};

/// Picks the next operation for a robot that just became available.
///
/// Called once per `RobotAvailable` event with a point-in-time factory
/// snapshot; implementations must not block.
pub trait Decider {
    /// Choose exactly one operation for the requesting robot.
    fn choose(
        &mut self,
        config: &WorldConfig,
        status: &FactoryStatus,
        workstation: Workstation,
    ) -> Operation;
}

/// Fixed priority ladder:
///
/// 1. buy a robot if the foo and money are there,
/// 2. sell if a full batch of foobar is in stock,
/// 3. otherwise a coin flip between mining foo and (craft if the inputs
///    are there, else mine bar).
#[derive(Debug)]
pub struct HeuristicDecider {
    rng: SmallRng,
}

impl HeuristicDecider {
    /// Create a decider with the given coin-flip generator.
    pub const fn new(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl Decider for HeuristicDecider {
    fn choose(
        &mut self,
        config: &WorldConfig,
        status: &FactoryStatus,
        _workstation: Workstation,
    ) -> Operation {
        if status.foo >= config.foo_required_for_robot && status.balance >= config.robot_retail_price
        {
            Operation::BuyRobot
        } else if status.foobar >= config.selling_batch_size {
            Operation::SellFoobar
        } else if self.rng.random::<f64>() < 0.5 {
            Operation::MineFoo
        } else if status.foo >= config.foo_required_for_foobar
            && status.bar >= config.bar_required_for_foobar
        {
            Operation::CraftFoobar
        } else {
            Operation::MineBar
        }
    }
}

/// Uniform pick over the five operation kinds, ignoring all state.
#[derive(Debug)]
pub struct RandomDecider {
    rng: SmallRng,
}

impl RandomDecider {
    /// Create a decider drawing from the given generator.
    pub const fn new(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl Decider for RandomDecider {
    fn choose(
        &mut self,
        _config: &WorldConfig,
        _status: &FactoryStatus,
        _workstation: Workstation,
    ) -> Operation {
        let pick = random_int_inclusive(&mut self.rng, 0.0, 4.0);
        let index = usize::try_from(pick).unwrap_or(0);
        Operation::ALL.get(index).copied().unwrap_or(Operation::MineBar)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[allow(clippy::panic)]
#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rust_decimal::Decimal;

    use super::*;

    fn status(foo: u32, bar: u32, foobar: u32, balance: i64, robot_count: usize) -> FactoryStatus {
        FactoryStatus {
            balance: Decimal::from(balance),
            foo,
            bar,
            foobar,
            robot_count,
        }
    }

    fn decider() -> HeuristicDecider {
        HeuristicDecider::new(SmallRng::seed_from_u64(42))
    }

    #[test]
    fn heuristic_buys_when_foo_and_money_suffice() {
        let config = WorldConfig::default();
        let operation = decider().choose(&config, &status(6, 0, 0, 3, 2), Workstation::MiningFoo);
        assert_eq!(operation, Operation::BuyRobot);
    }

    #[test]
    fn heuristic_does_not_buy_on_foo_alone() {
        let config = WorldConfig::default();
        let operation = decider().choose(&config, &status(6, 0, 0, 2, 2), Workstation::MiningFoo);
        assert_ne!(operation, Operation::BuyRobot);
    }

    #[test]
    fn heuristic_sells_a_full_batch() {
        let config = WorldConfig::default();
        let operation = decider().choose(&config, &status(0, 0, 5, 0, 2), Workstation::MiningFoo);
        assert_eq!(operation, Operation::SellFoobar);
    }

    #[test]
    fn heuristic_falls_back_to_mining_or_crafting() {
        let config = WorldConfig::default();
        let mut decider = decider();

        let mut seen_foo = false;
        let mut seen_craft = false;
        for _ in 0..200 {
            match decider.choose(&config, &status(1, 1, 0, 0, 2), Workstation::MiningFoo) {
                Operation::MineFoo => seen_foo = true,
                Operation::CraftFoobar => seen_craft = true,
                other => panic!("unexpected operation {other:?}"),
            }
        }
        assert!(seen_foo && seen_craft);
    }

    #[test]
    fn heuristic_mines_bar_when_craft_inputs_are_missing() {
        let config = WorldConfig::default();
        let mut decider = decider();

        let mut seen_bar = false;
        for _ in 0..200 {
            match decider.choose(&config, &status(0, 0, 0, 0, 2), Workstation::MiningFoo) {
                Operation::MineFoo => {}
                Operation::MineBar => seen_bar = true,
                other => panic!("unexpected operation {other:?}"),
            }
        }
        assert!(seen_bar);
    }

    #[test]
    fn random_decider_covers_all_kinds() {
        let config = WorldConfig::default();
        let mut decider = RandomDecider::new(SmallRng::seed_from_u64(7));

        let mut seen = [false; 5];
        for _ in 0..500 {
            let operation = decider.choose(&config, &status(0, 0, 0, 0, 2), Workstation::MiningFoo);
            if let Some(slot) = seen.get_mut(operation.index()) {
                *slot = true;
            }
        }
        assert_eq!(seen, [true; 5]);
    }
}
