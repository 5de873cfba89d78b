//! Product identifier used to key cart line items.
//!
//! IDs come from the product source and are opaque to the cart: two line items
//! are the same item exactly when their IDs compare equal.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable product identifier.
///
/// Serialized as a bare string (`#[serde(transparent)]`) so persisted carts
/// keep the `"id": "..."` shape.
///
/// # Example
///
/// ```rust
/// # use gomarket_core::ProductId;
/// let id = ProductId::new("p1");
/// assert_eq!(id.as_str(), "p1");
/// assert_eq!(id.to_string(), "p1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
