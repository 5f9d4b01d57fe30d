//! Trainer parameters.

use std::path::PathBuf;

use serde::Deserialize;

/// Population sizing, evolution rates, and generation timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainerConfig {
    /// Number of individuals run per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Fraction of the population kept unchanged as elites.
    #[serde(default = "default_elite_fraction")]
    pub elite_fraction: f64,

    /// Per-parameter replacement probability when mutating a child.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,

    /// Lower mutation rate used when expanding a single loaded seed
    /// into a full population.
    #[serde(default = "default_seed_expansion_mutation_rate")]
    pub seed_expansion_mutation_rate: f64,

    /// Real-time deadline bounding one generation, in ms.
    #[serde(default = "default_generation_deadline_ms")]
    pub generation_deadline_ms: u64,

    /// How many of the best individuals are logged per generation.
    #[serde(default = "default_report_size")]
    pub report_size: usize,

    /// Where to load the seed policy from and save the best policy to.
    /// Training starts from scratch and discards the result when unset.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            elite_fraction: default_elite_fraction(),
            mutation_rate: default_mutation_rate(),
            seed_expansion_mutation_rate: default_seed_expansion_mutation_rate(),
            generation_deadline_ms: default_generation_deadline_ms(),
            report_size: default_report_size(),
            model_path: None,
        }
    }
}

const fn default_population_size() -> usize {
    30
}

fn default_elite_fraction() -> f64 {
    0.1
}

fn default_mutation_rate() -> f64 {
    0.05
}

fn default_seed_expansion_mutation_rate() -> f64 {
    0.03
}

const fn default_generation_deadline_ms() -> u64 {
    5_000
}

const fn default_report_size() -> usize {
    5
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_an_empty_document() {
        let config: TrainerConfig = serde_json::from_str("{}").unwrap_or_default();
        assert_eq!(config, TrainerConfig::default());
    }

    #[test]
    fn partial_overrides_keep_the_rest() {
        let config: TrainerConfig =
            serde_json::from_str(r#"{"population_size": 8}"#).unwrap_or_default();
        assert_eq!(config.population_size, 8);
        assert_eq!(config.generation_deadline_ms, 5_000);
    }
}
