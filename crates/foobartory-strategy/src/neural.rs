//! Policy-driven decider: encode, predict, argmax.

use std::sync::Arc;

use foobartory_factory::WorldConfig;
use foobartory_types::{FactoryStatus, Operation, Workstation};

use crate::decide::Decider;
use crate::policy::{Policy, encode_state};

/// Delegates every decision to a [`Policy`] and takes the operation
/// with the highest score (ties broken by first index).
#[derive(Debug, Clone)]
pub struct PolicyDecider<P> {
    policy: Arc<P>,
}

impl<P: Policy> PolicyDecider<P> {
    /// Wrap a shared policy.
    pub const fn new(policy: Arc<P>) -> Self {
        Self { policy }
    }

    /// The wrapped policy.
    pub fn policy(&self) -> &Arc<P> {
        &self.policy
    }
}

impl<P: Policy> Decider for PolicyDecider<P> {
    fn choose(
        &mut self,
        _config: &WorldConfig,
        status: &FactoryStatus,
        workstation: Workstation,
    ) -> Operation {
        let state = encode_state(status, workstation);
        let scores = self.policy.predict(&state);

        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, score) in scores.iter().enumerate() {
            if *score > best_score {
                best_index = index;
                best_score = *score;
            }
        }
        Operation::ALL
            .get(best_index)
            .copied()
            .unwrap_or(Operation::MineBar)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::path::Path;

    use rand::Rng;
    use rust_decimal::Decimal;

    use crate::policy::{OPERATION_COUNT, StateVector};

    use super::*;

    /// Returns the same score vector for every state.
    #[derive(Debug, Clone)]
    struct FixedScores([f64; OPERATION_COUNT]);

    impl Policy for FixedScores {
        type Error = Infallible;

        fn random(_rng: &mut impl Rng) -> Self {
            Self([0.0; OPERATION_COUNT])
        }

        fn predict(&self, _state: &StateVector) -> [f64; OPERATION_COUNT] {
            self.0
        }

        fn mutate(&mut self, _rate: f64, _rng: &mut impl Rng) -> usize {
            0
        }

        fn crossover(&mut self, _other: &Self) {}

        fn save(&self, _path: &Path) -> Result<(), Self::Error> {
            Ok(())
        }

        fn load(_path: &Path) -> Result<Self, Self::Error> {
            Ok(Self([0.0; OPERATION_COUNT]))
        }
    }

    fn choose_with(scores: [f64; OPERATION_COUNT]) -> Operation {
        let mut decider = PolicyDecider::new(Arc::new(FixedScores(scores)));
        let status = FactoryStatus {
            balance: Decimal::ZERO,
            foo: 0,
            bar: 0,
            foobar: 0,
            robot_count: 2,
        };
        decider.choose(&WorldConfig::default(), &status, Workstation::MiningFoo)
    }

    #[test]
    fn picks_highest_score() {
        assert_eq!(choose_with([0.1, 0.2, 0.5, 0.1, 0.1]), Operation::CraftFoobar);
        assert_eq!(choose_with([0.1, 0.1, 0.1, 0.1, 0.6]), Operation::BuyRobot);
    }

    #[test]
    fn ties_break_to_first_index() {
        assert_eq!(choose_with([0.2, 0.2, 0.2, 0.2, 0.2]), Operation::MineBar);
        assert_eq!(choose_with([0.1, 0.3, 0.3, 0.2, 0.1]), Operation::MineFoo);
    }
}
