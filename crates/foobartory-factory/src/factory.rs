//! The factory: central resource hub and event hub for one simulation
//! instance.
//!
//! The factory aggregates one stock per material kind, the money ledger,
//! the simulated clock, the ordered robot registry, and the event hub. It
//! is the sole mutation point for shared resources: robots never touch a
//! stock or the ledger directly.
//!
//! Interior locks are held only across synchronous sections and always
//! released before an event is published, so handlers can freely read the
//! factory back.

use std::sync::{Arc, Mutex, MutexGuard};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_decimal::Decimal;

use foobartory_types::{Bar, FactoryStatus, Foo, Foobar, Quantity};

use crate::clock::Clock;
use crate::config::WorldConfig;
use crate::hub::{EventHub, EventKind, FactoryEvent};
use crate::ledger::{Ledger, LedgerError};
use crate::names::generate_moniker;
use crate::robot::{CraftOutcome, RandomCraftOutcome, Robot};
use crate::stock::{Stock, StockError};

/// Shared mutable state behind the factory's lock.
struct FactoryInner {
    foo: Stock<Foo>,
    bar: Stock<Bar>,
    foobar: Stock<Foobar>,
    ledger: Ledger,
    /// Robots in creation order.
    robots: Vec<Arc<Robot>>,
}

/// Central resource and event hub for one simulation instance.
pub struct Factory {
    config: Arc<WorldConfig>,
    inner: Mutex<FactoryInner>,
    clock: Clock,
    hub: EventHub,
    craft: Mutex<Box<dyn CraftOutcome>>,
    /// Generator for robot monikers and per-robot duration generators.
    names: Mutex<SmallRng>,
}

impl Factory {
    /// Create an empty factory (no robots, empty stocks, zero balance).
    pub fn new(config: Arc<WorldConfig>) -> Self {
        let clock = Clock::new(config.world_speed);
        Self {
            config,
            inner: Mutex::new(FactoryInner {
                foo: Stock::new(),
                bar: Stock::new(),
                foobar: Stock::new(),
                ledger: Ledger::new(),
                robots: Vec::new(),
            }),
            clock,
            hub: EventHub::new(),
            craft: Mutex::new(Box::new(RandomCraftOutcome::new())),
            names: Mutex::new(SmallRng::from_os_rng()),
        }
    }

    /// The world parameters this factory runs under.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The factory's simulated clock.
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Start the factory by creating the configured number of initial
    /// robots (each emitting `NewRobotBought` and `RobotAvailable`).
    pub fn start(&self) {
        for _ in 0..self.config.initial_robots {
            self.add_new_robot();
        }
    }

    /// Create a new robot, append it to the registry, and announce it.
    ///
    /// Emits `NewRobotBought`, then `RobotAvailable` with the new robot.
    pub fn add_new_robot(&self) -> Arc<Robot> {
        let robot = {
            let mut names = self.lock_names();
            let name = generate_moniker(&mut *names);
            let rng = SmallRng::from_rng(&mut *names);
            Arc::new(Robot::new(name, rng))
        };
        self.lock_inner().robots.push(Arc::clone(&robot));
        self.emit(&FactoryEvent::NewRobotBought);
        self.emit(&FactoryEvent::RobotAvailable(Arc::clone(&robot)));
        robot
    }

    /// Robots in creation order.
    pub fn robots(&self) -> Vec<Arc<Robot>> {
        self.lock_inner().robots.clone()
    }

    /// Number of robots registered with the factory.
    pub fn robot_count(&self) -> usize {
        self.lock_inner().robots.len()
    }

    // -----------------------------------------------------------------------
    // Foo stock management
    // -----------------------------------------------------------------------

    /// Take foo from stock.
    pub fn take_foo(&self, quantity: Quantity<Foo>) -> Result<(), StockError> {
        self.lock_inner().foo.take(quantity)
    }

    /// Store foo and emit `FooStockAvailable`.
    pub fn store_foo(&self, quantity: Quantity<Foo>) -> Result<(), StockError> {
        self.lock_inner().foo.store(quantity)?;
        self.emit(&FactoryEvent::FooStockAvailable);
        Ok(())
    }

    /// Whether at least `quantity` foo is in stock.
    pub fn has_enough_foo(&self, quantity: Quantity<Foo>) -> bool {
        self.lock_inner().foo.has_enough(quantity)
    }

    /// Foo currently in stock.
    pub fn foo_quantity_available(&self) -> Quantity<Foo> {
        self.lock_inner().foo.quantity_in_stock()
    }

    // -----------------------------------------------------------------------
    // Bar stock management
    // -----------------------------------------------------------------------

    /// Take bar from stock.
    pub fn take_bar(&self, quantity: Quantity<Bar>) -> Result<(), StockError> {
        self.lock_inner().bar.take(quantity)
    }

    /// Store bar and emit `BarStockAvailable`.
    pub fn store_bar(&self, quantity: Quantity<Bar>) -> Result<(), StockError> {
        self.lock_inner().bar.store(quantity)?;
        self.emit(&FactoryEvent::BarStockAvailable);
        Ok(())
    }

    /// Whether at least `quantity` bar is in stock.
    pub fn has_enough_bar(&self, quantity: Quantity<Bar>) -> bool {
        self.lock_inner().bar.has_enough(quantity)
    }

    /// Bar currently in stock.
    pub fn bar_quantity_available(&self) -> Quantity<Bar> {
        self.lock_inner().bar.quantity_in_stock()
    }

    // -----------------------------------------------------------------------
    // Foobar stock management
    // -----------------------------------------------------------------------

    /// Take foobar from stock.
    pub fn take_foobar(&self, quantity: Quantity<Foobar>) -> Result<(), StockError> {
        self.lock_inner().foobar.take(quantity)
    }

    /// Store foobar and emit `FoobarStockAvailable`.
    pub fn store_foobar(&self, quantity: Quantity<Foobar>) -> Result<(), StockError> {
        self.lock_inner().foobar.store(quantity)?;
        self.emit(&FactoryEvent::FoobarStockAvailable);
        Ok(())
    }

    /// Whether at least `quantity` foobar is in stock.
    pub fn has_enough_foobar(&self, quantity: Quantity<Foobar>) -> bool {
        self.lock_inner().foobar.has_enough(quantity)
    }

    /// Foobar currently in stock.
    pub fn foobar_quantity_available(&self) -> Quantity<Foobar> {
        self.lock_inner().foobar.quantity_in_stock()
    }

    // -----------------------------------------------------------------------
    // Money management
    // -----------------------------------------------------------------------

    /// Withdraw money from the ledger (no sufficiency check; the balance
    /// may go negative).
    pub fn withdraw_money(&self, amount: Decimal) -> Result<(), LedgerError> {
        self.lock_inner().ledger.withdraw(amount)
    }

    /// Deposit money and emit `MoneyDeposit`.
    pub fn make_deposit(&self, amount: Decimal) -> Result<(), LedgerError> {
        self.lock_inner().ledger.deposit(amount)?;
        self.emit(&FactoryEvent::MoneyDeposit);
        Ok(())
    }

    /// Whether the balance covers `amount`.
    pub fn has_enough_money(&self, amount: Decimal) -> bool {
        self.lock_inner().ledger.balance() >= amount
    }

    /// Current balance.
    pub fn balance(&self) -> Decimal {
        self.lock_inner().ledger.balance()
    }

    // -----------------------------------------------------------------------
    // Time, events, crafting
    // -----------------------------------------------------------------------

    /// Wait `nominal_ms` simulated milliseconds on this factory's clock.
    pub async fn wait(&self, nominal_ms: u64) {
        self.clock.wait(nominal_ms).await;
    }

    /// Register `handler` for every future emission of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&FactoryEvent) + Send + Sync + 'static,
    {
        self.hub.subscribe(kind, handler);
    }

    /// Resolve one crafting attempt through the injected outcome seam.
    pub fn resolve_craft(&self) -> bool {
        let mut craft = match self.craft.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        craft.resolve(self.config.craft_success_rate)
    }

    /// Replace the crafting-outcome resolver (tests inject deterministic
    /// outcomes here).
    pub fn set_craft_outcome(&self, resolver: Box<dyn CraftOutcome>) {
        let mut craft = match self.craft.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *craft = resolver;
    }

    /// Point-in-time snapshot of balance, stocks, and robot count.
    /// Read-only, no side effects.
    pub fn status(&self) -> FactoryStatus {
        let inner = self.lock_inner();
        FactoryStatus {
            balance: inner.ledger.balance(),
            foo: inner.foo.quantity_in_stock().amount(),
            bar: inner.bar.quantity_in_stock().amount(),
            foobar: inner.foobar.quantity_in_stock().amount(),
            robot_count: inner.robots.len(),
        }
    }

    pub(crate) fn emit(&self, event: &FactoryEvent) {
        self.hub.publish(event);
    }

    fn lock_inner(&self) -> MutexGuard<'_, FactoryInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_names(&self) -> MutexGuard<'_, SmallRng> {
        match self.names.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl core::fmt::Debug for Factory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Factory")
            .field("status", &self.status())
            .field("cumulative_ms", &self.clock.cumulative_ms())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
