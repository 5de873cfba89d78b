//! Immutable cart snapshots and the pure cart transitions.
//!
//! A [`CartSnapshot`] is the complete, ordered cart at one instant. Snapshots
//! are never modified: every transition builds a new item sequence and
//! returns it as a new snapshot, so a snapshot handed to an observer stays
//! valid no matter what happens to the cart afterwards. Cloning a snapshot is
//! an `Arc` bump.
//!
//! ## Transitions
//!
//! | Method | Effect | No-op when |
//! |--------|--------|------------|
//! | [`with_added`](CartSnapshot::with_added) | Appends a new item at quantity 1, or increments an existing one with the same ID | The existing quantity is saturated |
//! | [`with_incremented`](CartSnapshot::with_incremented) | Quantity + 1 | ID not in cart, or saturated |
//! | [`with_decremented`](CartSnapshot::with_decremented) | Quantity - 1 | ID not in cart, or quantity is 1 |
//!
//! Each returns `None` for a no-op so the caller can skip persisting and
//! publishing an identical cart.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use super::{LineItem, NewLineItem, ProductId, Quantity};

/// Errors that can occur when building a [`CartSnapshot`] from raw items.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The same product ID appears in more than one line item.
    #[error("duplicate line item id: {0}")]
    DuplicateId(ProductId),
}

/// The cart's ordered line items at one instant.
///
/// Items appear in the order their IDs were first added. IDs are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    items: Arc<[LineItem]>,
}

impl CartSnapshot {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// Build a snapshot from raw items, checking that IDs are unique.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::DuplicateId`] for the first repeated ID.
    pub fn try_from_items(items: Vec<LineItem>) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(SnapshotError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self {
            items: Arc::from(items),
        })
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line item quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Whether both snapshots share the same underlying item sequence.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Add a product: increment it if already present, append it otherwise.
    #[must_use]
    pub fn with_added(&self, product: NewLineItem) -> Option<Self> {
        if self.get(&product.id).is_some() {
            return self.with_incremented(&product.id);
        }

        let items: Vec<LineItem> = self
            .items
            .iter()
            .cloned()
            .chain(std::iter::once(product.into_line_item()))
            .collect();
        Some(Self {
            items: Arc::from(items),
        })
    }

    /// Increment the quantity of the item with `id`.
    #[must_use]
    pub fn with_incremented(&self, id: &ProductId) -> Option<Self> {
        self.replace_quantity(id, |item| {
            let next = item.quantity.incremented();
            (next != item.quantity).then_some(next)
        })
    }

    /// Decrement the quantity of the item with `id`, stopping at one.
    #[must_use]
    pub fn with_decremented(&self, id: &ProductId) -> Option<Self> {
        self.replace_quantity(id, |item| item.quantity.decremented())
    }

    /// Rebuild the sequence with a fresh copy of the matching item.
    fn replace_quantity<F>(&self, id: &ProductId, adjust: F) -> Option<Self>
    where
        F: FnOnce(&LineItem) -> Option<Quantity>,
    {
        let current = self.get(id)?;
        let replacement = current.with_quantity(adjust(current)?);

        let items: Vec<LineItem> = self
            .items
            .iter()
            .map(|item| {
                if &item.id == id {
                    replacement.clone()
                } else {
                    item.clone()
                }
            })
            .collect();
        Some(Self {
            items: Arc::from(items),
        })
    }
}

impl Default for CartSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
