//! Line item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Line items always hold at least one unit.
    #[error("quantity must be at least 1")]
    Zero,
}

/// Number of units of a product in the cart.
///
/// Zero is unrepresentable: a line item exists only while it holds at least
/// one unit, and decrementing stops at one. Deserializing `0` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit; the quantity of every newly added line item.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity from a raw count.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] if `count` is zero.
    pub fn new(count: u32) -> Result<Self, QuantityError> {
        NonZeroU32::new(count).map(Self).ok_or(QuantityError::Zero)
    }

    /// Get the raw count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer unit, or `None` when already at the floor of one.
    #[must_use]
    pub fn decremented(self) -> Option<Self> {
        NonZeroU32::new(self.0.get() - 1).map(Self)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
