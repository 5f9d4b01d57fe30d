//! Crate-level error type for factory operations.

use crate::ledger::LedgerError;
use crate::stock::StockError;

/// Any failure a robot operation can propagate.
///
/// Both variants indicate a violated contract rather than an expected
/// runtime condition: operations re-check their preconditions right before
/// consuming resources and complete as no-ops when a precondition no
/// longer holds, so neither error should occur in a well-behaved run.
/// They are never caught or retried inside the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    /// A stock mutation failed.
    #[error("stock error: {source}")]
    Stock {
        /// The underlying stock error.
        #[from]
        source: StockError,
    },

    /// A ledger mutation failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },
}
