//! Trainer error type.

/// Any failure the trainer propagates.
///
/// Breeding is a pure data transform and cannot fail by contract; the
/// only fallible steps are policy persistence around the generational
/// loop. A persistence failure aborts the save/load step and leaves the
/// in-memory population untouched.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    /// Saving or loading a policy failed.
    #[error("policy persistence failed: {source}")]
    Persistence {
        /// The provider's persistence error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An operation needing a scored population ran before any
    /// generation completed.
    #[error("the population is empty")]
    EmptyPopulation,
}
