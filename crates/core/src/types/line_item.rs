//! Cart line items.
//!
//! Field names are part of the persisted format: a cart is stored as a JSON
//! array of `{ "id", "title", "image_url", "price", "quantity" }` objects.

use serde::{Deserialize, Serialize};

use super::{ProductId, Quantity, UnitPrice};

/// One product entry in the cart plus its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Display name (not interpreted by the cart).
    pub title: String,
    /// Product image URL (not interpreted by the cart).
    pub image_url: String,
    /// Unit price (not interpreted by the cart).
    pub price: UnitPrice,
    /// Number of units, always at least one.
    pub quantity: Quantity,
}

impl LineItem {
    /// A fresh copy of this item carrying a different quantity.
    #[must_use]
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

/// A product as supplied by the product source, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: UnitPrice,
}

impl NewLineItem {
    /// Turn the product into a line item holding a single unit.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: Quantity::ONE,
        }
    }
}

impl From<LineItem> for NewLineItem {
    fn from(item: LineItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
        }
    }
}
