//! The factory's event hub.
//!
//! An explicit subscriber-list pub/sub: handlers register for one event
//! kind and are invoked synchronously, in subscription order, once per
//! emission. There is no batching and no async dispatch -- a `publish`
//! call returns only after every interested handler ran.
//!
//! Handlers may call back into the factory (reading status, sending into
//! channels) but must not subscribe or publish re-entrantly.

use std::sync::{Arc, RwLock};

use foobartory_types::Workstation;

use crate::robot::Robot;

/// The kinds of notifications a factory distributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Foo was stored; stock may now satisfy a waiting consumer.
    FooStockAvailable,
    /// Bar was stored.
    BarStockAvailable,
    /// Foobar was stored.
    FoobarStockAvailable,
    /// Money was deposited.
    MoneyDeposit,
    /// A robot finished an operation and is ready for the next one.
    RobotAvailable,
    /// A robot was assigned an operation.
    RobotBusy,
    /// A robot started moving to another workstation.
    RobotMoving,
    /// A new robot joined the factory.
    NewRobotBought,
}

/// A factory notification with its payload.
#[derive(Debug, Clone)]
pub enum FactoryEvent {
    /// Foo was stored.
    FooStockAvailable,
    /// Bar was stored.
    BarStockAvailable,
    /// Foobar was stored.
    FoobarStockAvailable,
    /// Money was deposited.
    MoneyDeposit,
    /// The robot finished an operation and is ready for the next one.
    RobotAvailable(Arc<Robot>),
    /// The robot was assigned an operation at `destination`.
    RobotBusy {
        /// The robot that turned busy.
        robot: Arc<Robot>,
        /// Workstation the operation runs at.
        destination: Workstation,
    },
    /// The robot started moving towards `destination`.
    RobotMoving {
        /// The robot in transit.
        robot: Arc<Robot>,
        /// Workstation the robot is heading to.
        destination: Workstation,
    },
    /// A new robot joined the factory.
    NewRobotBought,
}

impl FactoryEvent {
    /// The kind subscribers register under.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::FooStockAvailable => EventKind::FooStockAvailable,
            Self::BarStockAvailable => EventKind::BarStockAvailable,
            Self::FoobarStockAvailable => EventKind::FoobarStockAvailable,
            Self::MoneyDeposit => EventKind::MoneyDeposit,
            Self::RobotAvailable(_) => EventKind::RobotAvailable,
            Self::RobotBusy { .. } => EventKind::RobotBusy,
            Self::RobotMoving { .. } => EventKind::RobotMoving,
            Self::NewRobotBought => EventKind::NewRobotBought,
        }
    }
}

type Handler = Box<dyn Fn(&FactoryEvent) + Send + Sync>;

/// Subscriber list with synchronous, subscription-ordered dispatch.
#[derive(Default)]
pub struct EventHub {
    subscribers: RwLock<Vec<(EventKind, Handler)>>,
}

impl EventHub {
    /// Create an empty hub.
    pub const fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Register `handler` for every future emission of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&FactoryEvent) + Send + Sync + 'static,
    {
        let mut subscribers = match self.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.push((kind, Box::new(handler)));
    }

    /// Deliver `event` to all current subscribers of its kind, in
    /// subscription order.
    pub fn publish(&self, event: &FactoryEvent) {
        let subscribers = match self.subscribers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let kind = event.kind();
        for (_, handler) in subscribers.iter().filter(|(k, _)| *k == kind) {
            handler(event);
        }
    }
}

impl core::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let count = match self.subscribers.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        };
        f.debug_struct("EventHub").field("subscribers", &count).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn publish_reaches_only_matching_kind() {
        let hub = EventHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        hub.subscribe(EventKind::MoneyDeposit, move |_| {
            if let Ok(mut log) = sink.lock() {
                log.push("deposit");
            }
        });
        let sink = Arc::clone(&seen);
        hub.subscribe(EventKind::FooStockAvailable, move |_| {
            if let Ok(mut log) = sink.lock() {
                log.push("foo");
            }
        });

        hub.publish(&FactoryEvent::MoneyDeposit);
        hub.publish(&FactoryEvent::MoneyDeposit);

        let log = seen.lock().map(|l| l.clone()).unwrap_or_default();
        assert_eq!(log, vec!["deposit", "deposit"]);
    }

    #[test]
    fn dispatch_respects_subscription_order() {
        let hub = EventHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in 0..3_u32 {
            let sink = Arc::clone(&seen);
            hub.subscribe(EventKind::NewRobotBought, move |_| {
                if let Ok(mut log) = sink.lock() {
                    log.push(tag);
                }
            });
        }

        hub.publish(&FactoryEvent::NewRobotBought);

        let log = seen.lock().map(|l| l.clone()).unwrap_or_default();
        assert_eq!(log, vec![0, 1, 2]);
    }
}
