//! Simulated time for one factory.
//!
//! The clock is the single temporal source of truth for a simulation
//! instance. Every timed robot wait goes through [`Clock::wait`], which
//! accumulates the *nominal* duration and then sleeps the nominal duration
//! divided by the world speed in real time. Scores therefore compare
//! simulated time, independent of how fast the host actually runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Cumulative simulated time counter with speed-scaled real waits.
#[derive(Debug)]
pub struct Clock {
    /// Sum of all nominal wait durations issued so far, in milliseconds.
    cumulative_ms: AtomicU64,
    /// Real-time speedup factor; nominal waits sleep `nominal / speed`.
    world_speed: f64,
}

impl Clock {
    /// Create a clock running at `world_speed` times real time.
    ///
    /// A non-positive or non-finite speed falls back to real time (1.0).
    pub fn new(world_speed: f64) -> Self {
        let world_speed = if world_speed.is_finite() && world_speed > 0.0 {
            world_speed
        } else {
            1.0
        };
        Self {
            cumulative_ms: AtomicU64::new(0),
            world_speed,
        }
    }

    /// Wait for `nominal_ms` simulated milliseconds.
    ///
    /// The nominal duration is added to the cumulative counter before the
    /// (scaled) sleep begins, so the counter is monotonically
    /// non-decreasing at every observation point.
    pub async fn wait(&self, nominal_ms: u64) {
        self.cumulative_ms.fetch_add(nominal_ms, Ordering::Relaxed);
        #[allow(clippy::cast_precision_loss)]
        let real_secs = nominal_ms as f64 / self.world_speed / 1000.0;
        tokio::time::sleep(Duration::from_secs_f64(real_secs)).await;
    }

    /// Total nominal milliseconds waited by all robots of this factory.
    pub fn cumulative_ms(&self) -> u64 {
        self.cumulative_ms.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
