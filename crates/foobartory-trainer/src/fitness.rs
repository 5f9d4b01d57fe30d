//! Fitness scoring and roulette-wheel selection.

use rust_decimal::prelude::ToPrimitive;

use foobartory_types::FactoryStatus;

/// Base score of a winning run; the elapsed simulated time is
/// subtracted so faster wins score higher.
pub const WIN_SCORE_BASE: f64 = 100_000_000.0;

const ROBOT_WEIGHT: f64 = 100_000.0;
const BALANCE_WEIGHT: f64 = 10_000.0;
const FOOBAR_WEIGHT: f64 = 1_000.0;
const BAR_WEIGHT: f64 = 100.0;
const FOO_WEIGHT: f64 = 1.0;

/// Score one individual's final factory state.
///
/// A winner scores [`WIN_SCORE_BASE`] minus its cumulative simulated
/// milliseconds. Everyone else gets a weighted sum that ranks closeness
/// to the goal lexicographically: robots first, then balance, foobar,
/// bar, foo.
pub fn fitness(status: &FactoryStatus, goal: usize, elapsed_ms: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let robots = status.robot_count as f64;
    if status.robot_count >= goal {
        #[allow(clippy::cast_precision_loss)]
        return WIN_SCORE_BASE - elapsed_ms as f64;
    }
    robots * ROBOT_WEIGHT
        + status.balance.to_f64().unwrap_or(0.0) * BALANCE_WEIGHT
        + f64::from(status.foobar) * FOOBAR_WEIGHT
        + f64::from(status.bar) * BAR_WEIGHT
        + f64::from(status.foo) * FOO_WEIGHT
}

/// Walk `fitnesses` accumulating until the running sum exceeds `pick`;
/// returns the index of the member whose cumulative interval contains
/// `pick`, or `None` when `pick` is at or beyond the total.
pub fn roulette_index(fitnesses: &[f64], pick: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (index, fitness) in fitnesses.iter().enumerate() {
        cumulative += *fitness;
        if cumulative > pick {
            return Some(index);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
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

    #[test]
    fn winners_rank_by_speed() {
        let fast = fitness(&status(0, 0, 0, 0, 30), 30, 200_000);
        let slow = fitness(&status(0, 0, 0, 0, 30), 30, 400_000);
        assert!(fast > slow);
        assert!((fast - (WIN_SCORE_BASE - 200_000.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn losers_get_the_weighted_sum() {
        let score = fitness(&status(3, 2, 1, 4, 5), 30, 999_999);
        let expected = 5.0 * 100_000.0 + 4.0 * 10_000.0 + 1_000.0 + 200.0 + 3.0;
        assert!((score - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn any_winner_outranks_any_loser() {
        let winner = fitness(&status(0, 0, 0, 0, 30), 30, 10_000_000);
        let loser = fitness(&status(999, 999, 999, 999, 29), 30, 1);
        assert!(winner > loser);
    }

    #[test]
    fn roulette_maps_picks_to_cumulative_intervals() {
        let table = [10.0, 20.0, 30.0];
        assert_eq!(roulette_index(&table, 0.0), Some(0));
        assert_eq!(roulette_index(&table, 9.99), Some(0));
        assert_eq!(roulette_index(&table, 10.0), Some(1));
        assert_eq!(roulette_index(&table, 29.99), Some(1));
        assert_eq!(roulette_index(&table, 30.0), Some(2));
        assert_eq!(roulette_index(&table, 59.99), Some(2));
    }

    #[test]
    fn roulette_rejects_picks_at_or_beyond_the_total() {
        let table = [10.0, 20.0, 30.0];
        assert_eq!(roulette_index(&table, 60.0), None);
        assert_eq!(roulette_index(&[], 0.0), None);
    }
}
