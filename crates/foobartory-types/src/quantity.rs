//! Non-negative integer quantities tagged by material kind.
//!
//! A [`Quantity`] is immutable: arithmetic produces a new value of the same
//! kind. Subtraction below zero and addition past `u32::MAX` are refused
//! with `None` rather than wrapping -- callers decide what an impossible
//! amount means in their context.

use core::marker::PhantomData;

use crate::material::Material;

/// A non-negative amount of one material kind.
///
/// The marker type parameter ties the amount to its material at compile
/// time; quantities of different kinds are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity<M: Material> {
    amount: u32,
    _kind: PhantomData<M>,
}

impl<M: Material> Quantity<M> {
    /// The zero quantity of this material kind.
    pub const ZERO: Self = Self::new(0);

    /// Create a quantity of `amount` units.
    pub const fn new(amount: u32) -> Self {
        Self {
            amount,
            _kind: PhantomData,
        }
    }

    /// Return the number of units.
    pub const fn amount(self) -> u32 {
        self.amount
    }

    /// Whether this quantity is zero units.
    pub const fn is_zero(self) -> bool {
        self.amount == 0
    }

    /// Add another quantity of the same kind.
    ///
    /// Returns `None` if the sum overflows `u32`.
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.amount.checked_add(other.amount) {
            Some(sum) => Some(Self::new(sum)),
            None => None,
        }
    }

    /// Subtract another quantity of the same kind.
    ///
    /// Returns `None` if `other` exceeds `self` -- quantities are never
    /// negative.
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.amount.checked_sub(other.amount) {
            Some(rest) => Some(Self::new(rest)),
            None => None,
        }
    }

    /// The smaller of two quantities of the same kind.
    pub const fn min(self, other: Self) -> Self {
        if self.amount <= other.amount { self } else { other }
    }
}

impl<M: Material> Default for Quantity<M> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<M: Material> core::fmt::Display for Quantity<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.amount, M::NAME)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Bar, Foo};

    #[test]
    fn new_and_amount() {
        let q = Quantity::<Foo>::new(5);
        assert_eq!(q.amount(), 5);
        assert!(!q.is_zero());
        assert!(Quantity::<Foo>::ZERO.is_zero());
    }

    #[test]
    fn checked_add_sums_amounts() {
        let a = Quantity::<Bar>::new(2);
        let b = Quantity::<Bar>::new(3);
        assert_eq!(a.checked_add(b), Some(Quantity::new(5)));
    }

    #[test]
    fn checked_add_refuses_overflow() {
        let a = Quantity::<Bar>::new(u32::MAX);
        assert_eq!(a.checked_add(Quantity::new(1)), None);
    }

    #[test]
    fn checked_sub_stays_non_negative() {
        let a = Quantity::<Foo>::new(2);
        assert_eq!(a.checked_sub(Quantity::new(2)), Some(Quantity::ZERO));
        assert_eq!(a.checked_sub(Quantity::new(3)), None);
    }

    #[test]
    fn min_picks_smaller() {
        let a = Quantity::<Foo>::new(2);
        let b = Quantity::<Foo>::new(7);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
    }

    #[test]
    fn display_includes_material_name() {
        assert_eq!(Quantity::<Foo>::new(3).to_string(), "3 foo");
    }
}
