//! World parameters for one simulation instance.
//!
//! Timing, pricing, and ratio constants live outside the core logic; the
//! defaults reproduce the reference economy. All fields have serde
//! defaults so a partial YAML file only overrides what it names.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Timing, pricing, and ratio constants of the simulated economy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Real-time speedup: nominal wait durations are divided by this
    /// factor before sleeping.
    #[serde(default = "default_world_speed")]
    pub world_speed: f64,

    /// Nominal duration of a move between two workstations, in ms.
    #[serde(default = "default_move_duration_ms")]
    pub move_duration_ms: u64,

    /// Nominal duration of one foo mining operation, in ms.
    #[serde(default = "default_foo_mining_duration_ms")]
    pub foo_mining_duration_ms: u64,

    /// Lower bound of the bar mining duration range, in ms (inclusive).
    #[serde(default = "default_bar_mining_min_ms")]
    pub bar_mining_min_ms: u64,

    /// Upper bound of the bar mining duration range, in ms (inclusive).
    #[serde(default = "default_bar_mining_max_ms")]
    pub bar_mining_max_ms: u64,

    /// Nominal duration of one crafting attempt, in ms.
    #[serde(default = "default_crafting_duration_ms")]
    pub crafting_duration_ms: u64,

    /// Nominal selling duration per started batch, in ms.
    #[serde(default = "default_selling_duration_per_batch_ms")]
    pub selling_duration_per_batch_ms: u64,

    /// Number of foobars sold per selling batch.
    #[serde(default = "default_selling_batch_size")]
    pub selling_batch_size: u32,

    /// Probability that a crafting attempt succeeds, in `[0, 1]`.
    #[serde(default = "default_craft_success_rate")]
    pub craft_success_rate: f64,

    /// Foo units produced by one mining operation.
    #[serde(default = "default_units_per_mining_operation")]
    pub foo_per_mining_operation: u32,

    /// Bar units produced by one mining operation.
    #[serde(default = "default_units_per_mining_operation")]
    pub bar_per_mining_operation: u32,

    /// Foo units consumed per crafting attempt (never refunded).
    #[serde(default = "default_units_per_craft")]
    pub foo_required_for_foobar: u32,

    /// Bar units consumed per crafting attempt (refunded on failure).
    #[serde(default = "default_units_per_craft")]
    pub bar_required_for_foobar: u32,

    /// Foo units required to buy one robot.
    #[serde(default = "default_foo_required_for_robot")]
    pub foo_required_for_robot: u32,

    /// Money required to buy one robot.
    #[serde(default = "default_robot_retail_price")]
    pub robot_retail_price: Decimal,

    /// Money deposited per foobar sold.
    #[serde(default = "default_foobar_unit_price")]
    pub foobar_unit_price: Decimal,

    /// Robots created when the factory starts.
    #[serde(default = "default_initial_robots")]
    pub initial_robots: u32,

    /// Robot count at which a simulation run is won.
    #[serde(default = "default_robot_goal")]
    pub robot_goal: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_speed: default_world_speed(),
            move_duration_ms: default_move_duration_ms(),
            foo_mining_duration_ms: default_foo_mining_duration_ms(),
            bar_mining_min_ms: default_bar_mining_min_ms(),
            bar_mining_max_ms: default_bar_mining_max_ms(),
            crafting_duration_ms: default_crafting_duration_ms(),
            selling_duration_per_batch_ms: default_selling_duration_per_batch_ms(),
            selling_batch_size: default_selling_batch_size(),
            craft_success_rate: default_craft_success_rate(),
            foo_per_mining_operation: default_units_per_mining_operation(),
            bar_per_mining_operation: default_units_per_mining_operation(),
            foo_required_for_foobar: default_units_per_craft(),
            bar_required_for_foobar: default_units_per_craft(),
            foo_required_for_robot: default_foo_required_for_robot(),
            robot_retail_price: default_robot_retail_price(),
            foobar_unit_price: default_foobar_unit_price(),
            initial_robots: default_initial_robots(),
            robot_goal: default_robot_goal(),
        }
    }
}

fn default_world_speed() -> f64 {
    7.0
}

const fn default_move_duration_ms() -> u64 {
    5_000
}

const fn default_foo_mining_duration_ms() -> u64 {
    1_000
}

const fn default_bar_mining_min_ms() -> u64 {
    500
}

const fn default_bar_mining_max_ms() -> u64 {
    2_000
}

const fn default_crafting_duration_ms() -> u64 {
    2_000
}

const fn default_selling_duration_per_batch_ms() -> u64 {
    10_000
}

const fn default_selling_batch_size() -> u32 {
    5
}

fn default_craft_success_rate() -> f64 {
    0.6
}

const fn default_units_per_mining_operation() -> u32 {
    1
}

const fn default_units_per_craft() -> u32 {
    1
}

const fn default_foo_required_for_robot() -> u32 {
    6
}

fn default_robot_retail_price() -> Decimal {
    Decimal::from(3)
}

fn default_foobar_unit_price() -> Decimal {
    Decimal::ONE
}

const fn default_initial_robots() -> u32 {
    2
}

const fn default_robot_goal() -> usize {
    30
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_reference_economy() {
        let config = WorldConfig::default();
        assert_eq!(config.move_duration_ms, 5_000);
        assert_eq!(config.foo_required_for_robot, 6);
        assert_eq!(config.robot_retail_price, Decimal::from(3));
        assert_eq!(config.robot_goal, 30);
    }
}
