//! GoMarket Core - Shared cart domain types.
//!
//! This crate provides the types used by every GoMarket component:
//! - `cart` - The persistent cart store
//! - `cli` - Command-line host for the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no async runtime. Every cart transition is computed here as a value
//! (`CartSnapshot` in, `CartSnapshot` out); the `cart` crate decides when to
//! persist and publish it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and quantities, plus
//!   line items and cart snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
