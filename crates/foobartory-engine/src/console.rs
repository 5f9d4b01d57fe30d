//! Console subscribers: turn factory notifications into structured logs.

use std::sync::Arc;

use tracing::info;

use foobartory_factory::{EventKind, Factory, FactoryEvent};

/// Subscribe the console loggers to `factory`.
///
/// Robot events log the robot's name and destination; stock and deposit
/// events log a full status snapshot. Must be called before the factory
/// starts so the initial robots are reported too.
pub fn attach(factory: &Arc<Factory>) {
    factory.subscribe(EventKind::RobotAvailable, |event| {
        if let FactoryEvent::RobotAvailable(robot) = event {
            info!(robot = robot.name(), "robot available");
        }
    });

    factory.subscribe(EventKind::RobotBusy, |event| {
        if let FactoryEvent::RobotBusy { robot, destination } = event {
            info!(robot = robot.name(), ?destination, "robot assigned");
        }
    });

    factory.subscribe(EventKind::RobotMoving, |event| {
        if let FactoryEvent::RobotMoving { robot, destination } = event {
            info!(
                robot = robot.name(),
                from = ?robot.workstation(),
                to = ?destination,
                "robot moving"
            );
        }
    });

    factory.subscribe(EventKind::NewRobotBought, |_| {
        info!("new robot bought");
    });

    for kind in [
        EventKind::FooStockAvailable,
        EventKind::BarStockAvailable,
        EventKind::FoobarStockAvailable,
        EventKind::MoneyDeposit,
    ] {
        // Weak reference: the handler lives inside the factory's hub.
        let snapshot = Arc::downgrade(factory);
        factory.subscribe(kind, move |_| {
            if let Some(factory) = snapshot.upgrade() {
                let status = factory.status();
                info!(
                    balance = %status.balance,
                    foo = status.foo,
                    bar = status.bar,
                    foobar = status.foobar,
                    robots = status.robot_count,
                    "factory status"
                );
            }
        });
    }
}
