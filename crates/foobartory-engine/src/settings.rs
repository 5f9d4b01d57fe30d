//! Typed YAML settings for the binary.
//!
//! One `foobartory-config.yaml` file carries the world parameters, the
//! trainer parameters, and the strategy selection for run mode. Every
//! section and every field is optional; omissions fall back to the
//! reference economy.

use std::path::Path;

use serde::Deserialize;

use foobartory_factory::WorldConfig;
use foobartory_trainer::TrainerConfig;

/// Which decider run mode uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// The fixed priority ladder.
    #[default]
    Heuristic,
    /// Uniform random operations.
    Random,
}

/// Top-level settings: world, trainer, and run-mode strategy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    /// Simulated-economy parameters.
    #[serde(default)]
    pub world: WorldConfig,

    /// Evolutionary-loop parameters.
    #[serde(default)]
    pub trainer: TrainerConfig,

    /// Decider used in run mode.
    #[serde(default)]
    pub strategy: StrategyKind,
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_yml::from_str(&contents)?;
        Ok(settings)
    }
}

/// Any failure while loading the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading the file failed.
    #[error("failed to read settings file: {source}")]
    Io {
        /// The underlying i/o error.
        #[from]
        source: std::io::Error,
    },

    /// Parsing the YAML failed.
    #[error("failed to parse settings YAML: {source}")]
    Yaml {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings: Settings = serde_yml::from_str("{}").unwrap_or_default();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_sections_override_only_what_they_name() {
        let yaml = "
world:
  world_speed: 2.5
  robot_goal: 10
trainer:
  population_size: 12
strategy: random
";
        let settings: Settings = serde_yml::from_str(yaml).unwrap_or_default();
        assert_eq!(settings.strategy, StrategyKind::Random);
        assert_eq!(settings.world.robot_goal, 10);
        assert_eq!(settings.world.move_duration_ms, 5_000);
        assert_eq!(settings.trainer.population_size, 12);
        assert_eq!(settings.trainer.generation_deadline_ms, 5_000);
    }
}
