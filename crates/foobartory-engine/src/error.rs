//! Error types for the Foobartory binary.
//!
//! [`EngineError`] is the top-level error type that wraps all failure
//! modes of the run and train modes, so `main` can propagate with `?`.

use foobartory_policy::PolicyError;
use foobartory_trainer::TrainerError;

use crate::settings::SettingsError;

/// Top-level error for the Foobartory binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Settings loading failed.
    #[error("settings error: {source}")]
    Settings {
        /// The underlying settings error.
        #[from]
        source: SettingsError,
    },

    /// Loading or saving a policy failed.
    #[error("policy error: {source}")]
    Policy {
        /// The underlying provider error.
        #[from]
        source: PolicyError,
    },

    /// The trainer failed.
    #[error("trainer error: {source}")]
    Trainer {
        /// The underlying trainer error.
        #[from]
        source: TrainerError,
    },
}
