//! Per-material stock containers.
//!
//! A [`Stock`] owns exactly one [`Quantity`] of one material kind and is
//! mutated only through [`store`] and [`take`]. The quantity in stock is
//! never negative: `take` pre-checks availability and fails with
//! [`StockError::Insufficient`] instead of going below zero.
//!
//! [`store`]: Stock::store
//! [`take`]: Stock::take

use foobartory_types::{Material, Quantity};

/// Errors raised by stock mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockError {
    /// `take` requested more units than the stock holds.
    ///
    /// The operations always re-check availability right before taking,
    /// so this error indicates a violated precondition (or a skipped
    /// re-check), not an expected runtime condition.
    #[error("not enough {material} in stock: requested {requested}, available {available}")]
    Insufficient {
        /// Material kind name.
        material: &'static str,
        /// Units requested.
        requested: u32,
        /// Units actually available.
        available: u32,
    },

    /// `store` would overflow the stock counter.
    #[error("{material} stock overflow: cannot store {stored} more units")]
    Overflow {
        /// Material kind name.
        material: &'static str,
        /// Units that could not be stored.
        stored: u32,
    },
}

/// A container holding the factory's supply of one material kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stock<M: Material> {
    quantity: Quantity<M>,
}

impl<M: Material> Stock<M> {
    /// Create an empty stock.
    pub const fn new() -> Self {
        Self {
            quantity: Quantity::ZERO,
        }
    }

    /// Add `quantity` units to the stock.
    pub fn store(&mut self, quantity: Quantity<M>) -> Result<(), StockError> {
        self.quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or(StockError::Overflow {
                material: M::NAME,
                stored: quantity.amount(),
            })?;
        Ok(())
    }

    /// Remove `quantity` units from the stock.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Insufficient`] (leaving the stock unchanged)
    /// if the stock holds fewer units than requested.
    pub fn take(&mut self, quantity: Quantity<M>) -> Result<(), StockError> {
        self.quantity = self
            .quantity
            .checked_sub(quantity)
            .ok_or(StockError::Insufficient {
                material: M::NAME,
                requested: quantity.amount(),
                available: self.quantity.amount(),
            })?;
        Ok(())
    }

    /// Whether the stock holds at least `quantity` units. Pure predicate,
    /// no side effects.
    pub fn has_enough(&self, quantity: Quantity<M>) -> bool {
        quantity.amount() <= self.quantity.amount()
    }

    /// The quantity currently in stock, consistent with the last completed
    /// `store`/`take`.
    pub const fn quantity_in_stock(&self) -> Quantity<M> {
        self.quantity
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use foobartory_types::Bar;

    use super::*;

    #[test]
    fn store_increases_stock() {
        let mut stock = Stock::<Bar>::new();
        assert!(stock.store(Quantity::new(5)).is_ok());
        assert_eq!(stock.quantity_in_stock(), Quantity::new(5));
    }

    #[test]
    fn take_decreases_stock() {
        let mut stock = Stock::<Bar>::new();
        assert!(stock.store(Quantity::new(5)).is_ok());
        assert!(stock.take(Quantity::new(2)).is_ok());
        assert_eq!(stock.quantity_in_stock(), Quantity::new(3));
    }

    #[test]
    fn take_beyond_available_fails_and_leaves_stock_unchanged() {
        let mut stock = Stock::<Bar>::new();
        assert!(stock.store(Quantity::new(2)).is_ok());

        let result = stock.take(Quantity::new(5));
        assert_eq!(
            result,
            Err(StockError::Insufficient {
                material: "bar",
                requested: 5,
                available: 2,
            })
        );
        assert_eq!(stock.quantity_in_stock(), Quantity::new(2));
    }

    #[test]
    fn has_enough_is_pure() {
        let mut stock = Stock::<Bar>::new();
        assert!(stock.store(Quantity::new(3)).is_ok());
        assert!(stock.has_enough(Quantity::new(3)));
        assert!(!stock.has_enough(Quantity::new(4)));
        assert_eq!(stock.quantity_in_stock(), Quantity::new(3));
    }

    #[test]
    fn quantity_never_negative_over_mixed_sequences() {
        let mut stock = Stock::<Bar>::new();
        let steps: [(bool, u32); 7] = [
            (true, 3),
            (false, 1),
            (false, 5), // fails
            (true, 2),
            (false, 4),
            (false, 1), // fails
            (true, 1),
        ];
        for (is_store, amount) in steps {
            if is_store {
                assert!(stock.store(Quantity::new(amount)).is_ok());
            } else {
                let _ = stock.take(Quantity::new(amount));
            }
            assert!(stock.quantity_in_stock() >= Quantity::ZERO);
        }
        assert_eq!(stock.quantity_in_stock(), Quantity::new(1));
    }
}
