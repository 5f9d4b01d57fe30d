//! The robot state machine and its five operations.
//!
//! Every operation follows the same pattern: **begin** (turn busy, emit
//! `RobotBusy`, move if needed) -> **act** (timed effect against the
//! factory) -> **end** (turn available, emit `RobotAvailable`). A robot is
//! busy exactly while one operation is in flight; operations are not
//! reentrant. Operations that move first re-check their preconditions at
//! the point of consumption; when another robot got there first they
//! complete without effect -- that is the designed response, not an error.

use std::sync::{Arc, Mutex, MutexGuard};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use foobartory_types::{Quantity, RobotStatus, Workstation};

use crate::error::FactoryError;
use crate::factory::Factory;
use crate::hub::FactoryEvent;
use crate::random::random_int_inclusive;

// ---------------------------------------------------------------------------
// Craft outcome seam
// ---------------------------------------------------------------------------

/// Resolves the probabilistic outcome of a crafting attempt.
///
/// Injected into the factory so tests can force success or failure
/// without reaching into robot internals.
pub trait CraftOutcome: Send {
    /// Decide whether a crafting attempt with the given success
    /// probability succeeds.
    fn resolve(&mut self, success_rate: f64) -> bool;
}

/// The production resolver: a uniform draw against the success rate.
#[derive(Debug)]
pub struct RandomCraftOutcome {
    rng: SmallRng,
}

impl RandomCraftOutcome {
    /// Create a resolver with its own entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for RandomCraftOutcome {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftOutcome for RandomCraftOutcome {
    fn resolve(&mut self, success_rate: f64) -> bool {
        use rand::Rng;
        self.rng.random::<f64>() <= success_rate
    }
}

// ---------------------------------------------------------------------------
// Robot
// ---------------------------------------------------------------------------

/// Mutable robot state behind the lock.
struct RobotState {
    workstation: Workstation,
    status: RobotStatus,
    /// Private generator for variable operation durations.
    rng: SmallRng,
}

/// An autonomous agent performing timed operations against one factory.
///
/// Created by the factory (at start or as the effect of a buy operation)
/// and never destroyed within a run. Initially available at the foo mine.
pub struct Robot {
    name: String,
    state: Mutex<RobotState>,
}

impl Robot {
    /// Create an available robot at the foo mine.
    pub(crate) fn new(name: String, rng: SmallRng) -> Self {
        Self {
            name,
            state: Mutex::new(RobotState {
                workstation: Workstation::MiningFoo,
                status: RobotStatus::Available,
                rng,
            }),
        }
    }

    /// The robot's generated moniker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The robot's current workstation.
    pub fn workstation(&self) -> Workstation {
        self.lock_state().workstation
    }

    /// Whether the robot currently has an operation in flight.
    pub fn status(&self) -> RobotStatus {
        self.lock_state().status
    }

    fn lock_state(&self) -> MutexGuard<'_, RobotState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    // -----------------------------------------------------------------------
    // Operation pattern
    // -----------------------------------------------------------------------

    async fn begin_operation(self: &Arc<Self>, factory: &Factory, destination: Workstation) {
        self.lock_state().status = RobotStatus::Busy;
        factory.emit(&FactoryEvent::RobotBusy {
            robot: Arc::clone(self),
            destination,
        });
        self.move_to_if_needed(factory, destination).await;
    }

    fn complete_operation(self: &Arc<Self>, factory: &Factory) {
        self.lock_state().status = RobotStatus::Available;
        factory.emit(&FactoryEvent::RobotAvailable(Arc::clone(self)));
    }

    /// Move to `destination` if not already there.
    ///
    /// Emits `RobotMoving` while the robot is still at its old
    /// workstation, parks it at the transient [`Workstation::Moving`]
    /// marker for the move duration, then arrives. No event fires and no
    /// time passes when the robot is already at the destination.
    pub async fn move_to_if_needed(self: &Arc<Self>, factory: &Factory, destination: Workstation) {
        if self.lock_state().workstation == destination {
            return;
        }
        factory.emit(&FactoryEvent::RobotMoving {
            robot: Arc::clone(self),
            destination,
        });
        self.lock_state().workstation = Workstation::Moving;
        factory.wait(factory.config().move_duration_ms).await;
        self.lock_state().workstation = destination;
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Move, mine, and store one batch of foo. Always succeeds.
    pub async fn mine_and_store_foo(self: &Arc<Self>, factory: &Factory) -> Result<(), FactoryError> {
        self.begin_operation(factory, Workstation::MiningFoo).await;
        factory.wait(factory.config().foo_mining_duration_ms).await;
        factory.store_foo(Quantity::new(factory.config().foo_per_mining_operation))?;
        self.complete_operation(factory);
        Ok(())
    }

    /// Move, mine, and store one batch of bar. The mining duration is an
    /// integer drawn uniformly from the configured inclusive range.
    pub async fn mine_and_store_bar(self: &Arc<Self>, factory: &Factory) -> Result<(), FactoryError> {
        self.begin_operation(factory, Workstation::MiningBar).await;

        let config = factory.config();
        #[allow(clippy::cast_precision_loss)]
        let duration_ms = {
            let mut state = self.lock_state();
            random_int_inclusive(
                &mut state.rng,
                config.bar_mining_min_ms as f64,
                config.bar_mining_max_ms as f64,
            )
        };
        factory
            .wait(u64::try_from(duration_ms).unwrap_or(config.bar_mining_min_ms))
            .await;

        factory.store_bar(Quantity::new(config.bar_per_mining_operation))?;
        self.complete_operation(factory);
        Ok(())
    }

    /// Move, craft, and store one foobar.
    ///
    /// The stock re-check happens here, after the move -- an ineffective
    /// strategy may have sent the robot to craft with nothing in stock, or
    /// another robot may have taken the inputs while this one was moving.
    /// In that case the operation completes without crafting. When inputs
    /// are available they are taken up front; on a failed attempt the bar
    /// is refunded but the foo stays consumed (an economic rule, not an
    /// error path).
    pub async fn craft_and_store_foobar(
        self: &Arc<Self>,
        factory: &Factory,
    ) -> Result<(), FactoryError> {
        self.begin_operation(factory, Workstation::CraftingFoobar).await;

        let config = factory.config();
        let bar_needed = Quantity::new(config.bar_required_for_foobar);
        let foo_needed = Quantity::new(config.foo_required_for_foobar);

        if factory.has_enough_bar(bar_needed) && factory.has_enough_foo(foo_needed) {
            factory.take_bar(bar_needed)?;
            factory.take_foo(foo_needed)?;

            factory.wait(config.crafting_duration_ms).await;

            if factory.resolve_craft() {
                factory.store_foobar(Quantity::new(1))?;
            } else {
                debug!(robot = %self.name, "crafting failed, bar refunded");
                factory.store_bar(bar_needed)?;
            }
        }

        self.complete_operation(factory);
        Ok(())
    }

    /// Move, take, and sell foobar.
    ///
    /// Sells at most the quantity available at the moment of execution;
    /// the selling duration scales with the number of started batches.
    /// With nothing sellable the operation completes without any resource
    /// or money movement.
    pub async fn sell_foobar(
        self: &Arc<Self>,
        factory: &Factory,
        requested: Quantity<foobartory_types::Foobar>,
    ) -> Result<(), FactoryError> {
        self.begin_operation(factory, Workstation::SellingFoobar).await;

        let config = factory.config();
        let sellable = requested.min(factory.foobar_quantity_available());
        if !sellable.is_zero() {
            factory.take_foobar(sellable)?;

            let batches = sellable.amount().div_ceil(config.selling_batch_size.max(1));
            factory
                .wait(u64::from(batches).saturating_mul(config.selling_duration_per_batch_ms))
                .await;

            let proceeds = config
                .foobar_unit_price
                .saturating_mul(rust_decimal::Decimal::from(sellable.amount()));
            factory.make_deposit(proceeds)?;
            debug!(robot = %self.name, sold = sellable.amount(), %proceeds, "foobar sold");
        }

        self.complete_operation(factory);
        Ok(())
    }

    /// Move and buy a new robot for foo plus money.
    ///
    /// Preconditions are re-checked here, at the moment of execution; if
    /// either no longer holds the operation completes with no effect.
    pub async fn buy_new_robot(self: &Arc<Self>, factory: &Factory) -> Result<(), FactoryError> {
        self.begin_operation(factory, Workstation::BuyingRobot).await;

        let config = factory.config();
        let foo_required = Quantity::new(config.foo_required_for_robot);
        let price = config.robot_retail_price;

        if factory.has_enough_foo(foo_required) && factory.has_enough_money(price) {
            factory.take_foo(foo_required)?;
            factory.withdraw_money(price)?;
            factory.add_new_robot();
        }

        self.complete_operation(factory);
        Ok(())
    }
}

impl core::fmt::Debug for Robot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Robot")
            .field("name", &self.name)
            .field("workstation", &self.workstation())
            .field("status", &self.status())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use foobartory_types::{Foobar, Quantity, RobotStatus, Workstation};

    use super::*;
    use crate::config::WorldConfig;
    use crate::factory::Factory;

    /// Deterministic craft resolver for tests.
    struct FixedCraftOutcome(bool);

    impl CraftOutcome for FixedCraftOutcome {
        fn resolve(&mut self, _success_rate: f64) -> bool {
            self.0
        }
    }

    fn test_factory() -> Arc<Factory> {
        Arc::new(Factory::new(Arc::new(WorldConfig::default())))
    }

    fn lone_robot(factory: &Factory) -> Arc<Robot> {
        factory.add_new_robot();
        factory.robots().first().cloned().unwrap_or_else(|| {
            Arc::new(Robot::new(String::from("spare"), SmallRng::seed_from_u64(0)))
        })
    }

    #[tokio::test(start_paused = true)]
    async fn mine_foo_stores_exactly_one_foo() {
        let factory = test_factory();
        let robot = lone_robot(&factory);

        assert!(robot.mine_and_store_foo(&factory).await.is_ok());

        let status = factory.status();
        assert_eq!(status.foo, 1);
        assert_eq!(status.bar, 0);
        assert_eq!(status.foobar, 0);
        assert_eq!(robot.workstation(), Workstation::MiningFoo);
        assert_eq!(robot.status(), RobotStatus::Available);
        // No move needed: only the mining duration is accounted.
        assert_eq!(factory.clock().cumulative_ms(), 1_000);
    }

    #[tokio::test(start_paused = true)]
    async fn mine_bar_duration_is_within_range() {
        let factory = test_factory();
        let robot = lone_robot(&factory);

        assert!(robot.mine_and_store_bar(&factory).await.is_ok());

        let status = factory.status();
        assert_eq!(status.bar, 1);
        assert_eq!(robot.workstation(), Workstation::MiningBar);

        // Move (5000) plus a bar mining duration in [500, 2000].
        let elapsed = factory.clock().cumulative_ms();
        assert!((5_500..=7_000).contains(&elapsed), "elapsed {elapsed}");
    }

    #[tokio::test(start_paused = true)]
    async fn craft_success_consumes_inputs_and_stores_foobar() {
        let factory = test_factory();
        factory.set_craft_outcome(Box::new(FixedCraftOutcome(true)));
        let robot = lone_robot(&factory);
        assert!(factory.store_foo(Quantity::new(1)).is_ok());
        assert!(factory.store_bar(Quantity::new(1)).is_ok());

        assert!(robot.craft_and_store_foobar(&factory).await.is_ok());

        let status = factory.status();
        assert_eq!(status.foo, 0);
        assert_eq!(status.bar, 0);
        assert_eq!(status.foobar, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn craft_failure_refunds_bar_but_not_foo() {
        let factory = test_factory();
        factory.set_craft_outcome(Box::new(FixedCraftOutcome(false)));
        let robot = lone_robot(&factory);
        assert!(factory.store_foo(Quantity::new(1)).is_ok());
        assert!(factory.store_bar(Quantity::new(1)).is_ok());

        assert!(robot.craft_and_store_foobar(&factory).await.is_ok());

        let status = factory.status();
        assert_eq!(status.foo, 0, "foo is consumed regardless of outcome");
        assert_eq!(status.bar, 1, "bar is refunded on failure");
        assert_eq!(status.foobar, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn craft_without_stock_completes_as_noop() {
        let factory = test_factory();
        factory.set_craft_outcome(Box::new(FixedCraftOutcome(true)));
        let robot = lone_robot(&factory);

        assert!(robot.craft_and_store_foobar(&factory).await.is_ok());

        let status = factory.status();
        assert_eq!(status.foobar, 0);
        assert_eq!(robot.status(), RobotStatus::Available);
    }

    #[tokio::test(start_paused = true)]
    async fn sell_is_bounded_by_available_stock() {
        let factory = test_factory();
        let robot = lone_robot(&factory);
        assert!(factory.store_foobar(Quantity::new(3)).is_ok());

        let sale = robot.sell_foobar(&factory, Quantity::<Foobar>::new(5));
        assert!(sale.await.is_ok());

        let status = factory.status();
        assert_eq!(status.foobar, 0, "only the available 3 were sold");
        assert_eq!(status.balance, Decimal::from(3));
    }

    #[tokio::test(start_paused = true)]
    async fn sell_duration_scales_with_batches() {
        let factory = test_factory();
        let robot = lone_robot(&factory);
        assert!(factory.store_foobar(Quantity::new(6)).is_ok());

        let sale = robot.sell_foobar(&factory, Quantity::<Foobar>::new(6));
        assert!(sale.await.is_ok());

        // Move (5000) + ceil(6 / 5) = 2 batches of 10000.
        assert_eq!(factory.clock().cumulative_ms(), 25_000);
        assert_eq!(factory.status().balance, Decimal::from(6));
    }

    #[tokio::test(start_paused = true)]
    async fn sell_nothing_moves_no_money() {
        let factory = test_factory();
        let robot = lone_robot(&factory);

        let sale = robot.sell_foobar(&factory, Quantity::<Foobar>::new(4));
        assert!(sale.await.is_ok());

        assert_eq!(factory.status().balance, Decimal::ZERO);
        assert_eq!(robot.status(), RobotStatus::Available);
        // Only the move was waited for; no selling batch started.
        assert_eq!(factory.clock().cumulative_ms(), 5_000);
    }

    #[tokio::test(start_paused = true)]
    async fn buy_robot_takes_foo_and_money_and_registers_robot() {
        let factory = test_factory();
        let robot = lone_robot(&factory);
        assert!(factory.store_foo(Quantity::new(6)).is_ok());
        assert!(factory.make_deposit(Decimal::from(3)).is_ok());

        assert!(robot.buy_new_robot(&factory).await.is_ok());

        let status = factory.status();
        assert_eq!(status.foo, 0);
        assert_eq!(status.balance, Decimal::ZERO);
        assert_eq!(status.robot_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn buy_robot_without_funds_is_a_noop() {
        let factory = test_factory();
        let robot = lone_robot(&factory);
        assert!(factory.store_foo(Quantity::new(6)).is_ok());
        // Money missing.

        assert!(robot.buy_new_robot(&factory).await.is_ok());

        let status = factory.status();
        assert_eq!(status.foo, 6);
        assert_eq!(status.robot_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn move_only_happens_when_needed() {
        let factory = test_factory();
        let robot = lone_robot(&factory);
        assert_eq!(robot.workstation(), Workstation::MiningFoo);

        robot.move_to_if_needed(&factory, Workstation::SellingFoobar).await;
        assert_eq!(robot.workstation(), Workstation::SellingFoobar);
        assert_eq!(factory.clock().cumulative_ms(), 5_000);

        robot.move_to_if_needed(&factory, Workstation::SellingFoobar).await;
        assert_eq!(factory.clock().cumulative_ms(), 5_000, "no second move");
    }
}
