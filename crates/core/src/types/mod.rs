//! Core types for GoMarket.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;
pub mod snapshot;

pub use id::ProductId;
pub use line_item::{LineItem, NewLineItem};
pub use price::UnitPrice;
pub use quantity::{Quantity, QuantityError};
pub use snapshot::{CartSnapshot, SnapshotError};
