//! The shared run loop: bridges factory events into decisions and
//! dispatches robot operations until the population goal is reached.
//!
//! The factory's event hub is synchronous; decisions must not run
//! inside a handler (a decision dispatches an operation, which emits
//! further events). The loop therefore forwards `RobotAvailable` events
//! into an unbounded channel and consumes them asynchronously, one
//! decision per idle robot, each dispatched as its own spawned task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use foobartory_factory::{EventKind, Factory, FactoryError, FactoryEvent, Robot};
use foobartory_types::Operation;

use crate::decide::Decider;

/// Shared cancellation flag, read once per decision (never
/// mid-operation).
pub type StopFlag = Arc<AtomicBool>;

/// Drive `factory` with `decider` until the robot-count goal is reached
/// or `stop` is raised externally; returns whether the goal was reached.
///
/// Subscribes to the event hub, then starts the factory, so the initial
/// robots' availability is observed too. In-flight operations always
/// run to completion; only new decisions are suppressed.
pub async fn run_until_goal<D>(factory: Arc<Factory>, mut decider: D, stop: StopFlag) -> bool
where
    D: Decider + Send,
{
    let (robot_tx, mut robot_rx) = mpsc::unbounded_channel::<Arc<Robot>>();
    let (won_tx, mut won_rx) = watch::channel(false);

    factory.subscribe(EventKind::RobotAvailable, move |event| {
        if let FactoryEvent::RobotAvailable(robot) = event {
            let _ = robot_tx.send(Arc::clone(robot));
        }
    });

    // Weak reference: the handler lives inside the factory's own hub.
    let goal_check = Arc::downgrade(&factory);
    let goal_stop = Arc::clone(&stop);
    factory.subscribe(EventKind::NewRobotBought, move |_| {
        if let Some(factory) = goal_check.upgrade() {
            if factory.robot_count() >= factory.config().robot_goal {
                goal_stop.store(true, Ordering::SeqCst);
                let _ = won_tx.send(true);
            }
        }
    });

    factory.start();

    loop {
        tokio::select! {
            changed = won_rx.changed() => {
                if changed.is_ok() {
                    info!(
                        robots = factory.robot_count(),
                        elapsed_ms = factory.clock().cumulative_ms(),
                        "population goal reached"
                    );
                }
                break;
            }
            maybe_robot = robot_rx.recv() => {
                let Some(robot) = maybe_robot else { break };
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                dispatch(&factory, &mut decider, robot);
            }
        }
    }

    factory.robot_count() >= factory.config().robot_goal
}

/// Decide one operation for `robot` and run it as its own task.
fn dispatch<D: Decider>(factory: &Arc<Factory>, decider: &mut D, robot: Arc<Robot>) {
    let status = factory.status();
    let operation = decider.choose(factory.config(), &status, robot.workstation());
    debug!(robot = robot.name(), ?operation, "operation assigned");

    let factory = Arc::clone(factory);
    tokio::spawn(async move {
        if let Err(error) = perform(&robot, &factory, operation).await {
            warn!(robot = robot.name(), %error, "operation aborted");
        }
    });
}

async fn perform(
    robot: &Arc<Robot>,
    factory: &Factory,
    operation: Operation,
) -> Result<(), FactoryError> {
    match operation {
        Operation::MineBar => robot.mine_and_store_bar(factory).await,
        Operation::MineFoo => robot.mine_and_store_foo(factory).await,
        Operation::CraftFoobar => robot.craft_and_store_foobar(factory).await,
        Operation::SellFoobar => {
            let requested = factory.foobar_quantity_available();
            robot.sell_foobar(factory, requested).await
        }
        Operation::BuyRobot => robot.buy_new_robot(factory).await,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
