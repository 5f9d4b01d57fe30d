//! Generated robot and lineage monikers.
//!
//! Example output: `murky-hands`.

use rand::Rng;

static ADJECTIVES: &[&str] = &[
    "murky", "brisk", "rusty", "quiet", "nimble", "sturdy", "dusty", "shiny", "eager", "drowsy",
    "crafty", "zippy", "grumpy", "mellow", "frantic", "steady", "oily", "tidy", "clanky", "gentle",
    "restless", "humming", "patient", "stubborn",
];

static NOUNS: &[&str] = &[
    "hands", "gears", "pistons", "wrench", "sprocket", "dynamo", "rivet", "bolt", "crank",
    "lever", "bearing", "socket", "magnet", "spring", "gasket", "flywheel", "anvil", "chisel",
    "pulley", "valve", "rotor", "solder", "hinge", "cog",
];

/// Generate a random adjective-noun moniker.
pub fn generate_moniker(rng: &mut impl Rng) -> String {
    let adjective = ADJECTIVES
        .get(rng.random_range(0..ADJECTIVES.len()))
        .copied()
        .unwrap_or("plain");
    let noun = NOUNS
        .get(rng.random_range(0..NOUNS.len()))
        .copied()
        .unwrap_or("robot");
    format!("{adjective}-{noun}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
