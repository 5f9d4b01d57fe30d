//! Persistence errors for the policy provider.

/// Any failure while saving or loading a policy.
///
/// Persistence is the only fallible capability of a policy; everything
/// else is a pure data transform.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Reading or writing the policy file failed.
    #[error("policy file i/o error: {source}")]
    Io {
        /// The underlying i/o error.
        #[from]
        source: std::io::Error,
    },

    /// Encoding or decoding the policy JSON failed.
    #[error("policy serialization error: {source}")]
    Serde {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
