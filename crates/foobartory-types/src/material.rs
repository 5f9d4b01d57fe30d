//! Material kind markers for the Foobartory economy.
//!
//! Each material is a zero-sized marker type implementing [`Material`].
//! Tagging [`Quantity`] with a marker makes mixing material kinds a type
//! error instead of a runtime bug: a `Quantity<Foo>` cannot be stored in a
//! bar stock or added to a `Quantity<Bar>`.
//!
//! [`Quantity`]: crate::quantity::Quantity

/// A material kind that can be mined, crafted, stored, and sold.
///
/// Implemented only by the three marker types [`Foo`], [`Bar`], and
/// [`Foobar`]. The bound set mirrors what the derives on
/// [`Quantity`](crate::quantity::Quantity) need.
pub trait Material: Copy + Eq + Ord + core::fmt::Debug + Send + Sync + 'static {
    /// Human-readable material name used in logs and error messages.
    const NAME: &'static str;
}

/// Raw material mined at the foo workstation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Foo;

impl Material for Foo {
    const NAME: &'static str = "foo";
}

/// Raw material mined at the bar workstation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bar;

impl Material for Bar {
    const NAME: &'static str = "bar";
}

/// Finished good crafted from one foo and one bar, sold for money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Foobar;

impl Material for Foobar {
    const NAME: &'static str = "foobar";
}
