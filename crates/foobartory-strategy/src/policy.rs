//! The opaque policy seam and the state-vector encoding it consumes.
//!
//! The run loop and the trainer only ever see this trait: a policy maps
//! an encoded factory snapshot to one score per operation kind and
//! supports the five evolution capabilities (random init, clone,
//! mutate, crossover, persistence). The concrete provider lives in
//! `foobartory-policy`.

use std::path::Path;

use rand::Rng;
use rust_decimal::prelude::ToPrimitive;

use foobartory_types::{FactoryStatus, Workstation};

/// Length of the encoded state vector.
pub const STATE_DIM: usize = 6;

/// Number of scores a policy returns, one per operation kind.
pub const OPERATION_COUNT: usize = 5;

/// Encoded factory snapshot fed to a policy.
pub type StateVector = [f64; STATE_DIM];

/// A decision policy: scores the five operation kinds for one encoded
/// factory state, and supports the evolution capabilities the trainer
/// breeds with.
///
/// Implementations are pure data transforms; only persistence can fail.
pub trait Policy: Clone + Send + Sync + Sized + 'static {
    /// Persistence failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// A freshly initialized policy with randomized parameters.
    fn random(rng: &mut impl Rng) -> Self;

    /// Score every operation kind for the given state, in
    /// [`foobartory_types::Operation::ALL`] order.
    fn predict(&self, state: &StateVector) -> [f64; OPERATION_COUNT];

    /// Replace each parameter with a fresh random draw with probability
    /// `rate`; returns the number of parameters mutated.
    fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> usize;

    /// Overwrite the even parameter positions within each layer with the
    /// other parent's values.
    fn crossover(&mut self, other: &Self);

    /// Persist this policy to `path`.
    fn save(&self, path: &Path) -> Result<(), Self::Error>;

    /// Restore a policy from `path`.
    fn load(path: &Path) -> Result<Self, Self::Error>;
}

/// Encode a factory snapshot plus the requesting robot's workstation
/// into the fixed policy input vector.
///
/// Stocks, balance, and robot count are divided by 100 to normalize;
/// the workstation enters as its raw id.
pub fn encode_state(status: &FactoryStatus, workstation: Workstation) -> StateVector {
    #[allow(clippy::cast_precision_loss)]
    let robots = status.robot_count as f64;
    [
        f64::from(status.foo) / 100.0,
        f64::from(status.bar) / 100.0,
        f64::from(status.foobar) / 100.0,
        status.balance.to_f64().unwrap_or(0.0) / 100.0,
        robots / 100.0,
        f64::from(workstation.id()),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
