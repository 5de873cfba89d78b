//! Consumer-facing cart handle.
//!
//! Parts of an application that display or modify the cart receive a
//! [`CartHandle`] instead of the store itself. The handle holds a weak
//! reference: it never keeps a store alive, and using it after the store is
//! gone (or a handle that was never wired to a store) fails with
//! [`UsageError::NoActiveStore`] instead of quietly showing an empty cart.

use std::sync::Weak;

use gomarket_core::{CartSnapshot, NewLineItem, ProductId};
use tokio::sync::watch;

use crate::error::{CartError, UsageError};
use crate::store::{CartStore, CartStoreInner};

/// Weak, cloneable reference to a [`CartStore`].
#[derive(Clone, Debug)]
pub struct CartHandle {
    inner: Weak<CartStoreInner>,
}

impl CartHandle {
    pub(crate) const fn new(inner: Weak<CartStoreInner>) -> Self {
        Self { inner }
    }

    /// A handle not wired to any store. Every operation fails.
    #[must_use]
    pub const fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    /// Whether a live store is behind this handle.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// The store behind this handle.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::NoActiveStore` if the store has been dropped or
    /// the handle is detached.
    pub fn store(&self) -> Result<CartStore, UsageError> {
        self.inner
            .upgrade()
            .map(|inner| CartStore { inner })
            .ok_or(UsageError::NoActiveStore)
    }

    /// The latest published snapshot.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::NoActiveStore` without a live store.
    pub fn snapshot(&self) -> Result<CartSnapshot, UsageError> {
        Ok(self.store()?.snapshot())
    }

    /// Observe every published snapshot.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::NoActiveStore` without a live store.
    pub fn subscribe(&self) -> Result<watch::Receiver<CartSnapshot>, UsageError> {
        Ok(self.store()?.subscribe())
    }

    /// See [`CartStore::add_to_cart`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Usage` without a live store, or the store's error.
    pub async fn add_to_cart(&self, product: NewLineItem) -> Result<(), CartError> {
        self.store()?.add_to_cart(product).await
    }

    /// See [`CartStore::increment`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Usage` without a live store, or the store's error.
    pub async fn increment(&self, id: &ProductId) -> Result<(), CartError> {
        self.store()?.increment(id).await
    }

    /// See [`CartStore::decrement`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Usage` without a live store, or the store's error.
    pub async fn decrement(&self, id: &ProductId) -> Result<(), CartError> {
        self.store()?.decrement(id).await
    }
}

impl Default for CartHandle {
    fn default() -> Self {
        Self::detached()
    }
}
