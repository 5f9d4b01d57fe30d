//! Uniform-draw to inclusive-integer-range mapping.
//!
//! The simulation draws integer values (bar mining durations) from
//! inclusive ranges by mapping a uniform value in `[0, 1)` linearly onto
//! the range: the minimum is rounded up, the maximum rounded down, and the
//! draw scaled by `max - min + 1` so both endpoints are reachable.

use rand::Rng;

/// Map a uniform `unit` in `[0, 1)` onto the inclusive integer range
/// `[ceil(min), floor(max)]`.
///
/// With `unit` of 0 the result is the (rounded-up) minimum; with `unit`
/// just below 1 it is the (rounded-down) maximum. An empty range (after
/// rounding) collapses to the minimum.
#[allow(clippy::cast_possible_truncation)]
pub fn unit_to_int_inclusive(unit: f64, min: f64, max: f64) -> i64 {
    let min = min.ceil();
    let max = max.floor();
    let span = (max - min + 1.0).max(0.0);
    ((unit.clamp(0.0, 1.0) * span).floor() + min) as i64
}

/// Draw a random integer from the inclusive range `[min, max]`.
pub fn random_int_inclusive<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> i64 {
    unit_to_int_inclusive(rng.random::<f64>(), min, max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
