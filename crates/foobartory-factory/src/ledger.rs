//! The factory's money ledger.
//!
//! Balances use [`Decimal`] -- no floating point in the ledger. Deposits
//! and withdrawals validate that the amount is strictly positive, but a
//! withdrawal performs **no sufficiency check**: the balance can go
//! negative. Callers that care about solvency check `has_enough_money`
//! before withdrawing, as the buy operation does.

use rust_decimal::Decimal;

/// Errors raised by ledger mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A deposit or withdrawal was requested with a non-positive amount.
    #[error("amount must be > 0, got {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: Decimal,
    },
}

/// A signed money balance mutated only via validated deposits and
/// withdrawals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    balance: Decimal,
}

impl Ledger {
    /// Create a ledger with a zero balance.
    pub const fn new() -> Self {
        Self {
            balance: Decimal::ZERO,
        }
    }

    /// Add `amount` to the balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] if `amount <= 0`.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { amount });
        }
        self.balance = self.balance.saturating_add(amount);
        Ok(())
    }

    /// Subtract `amount` from the balance. The balance may go negative.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] if `amount <= 0`.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { amount });
        }
        self.balance = self.balance.saturating_sub(amount);
        Ok(())
    }

    /// The current balance.
    pub const fn balance(&self) -> Decimal {
        self.balance
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
