//! GoMarket Cart - Persistent shopping cart store.
//!
//! This crate keeps the authoritative in-memory cart and mirrors every change
//! to a key-value store, so the cart survives restarts.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the current [`CartSnapshot`](gomarket_core::CartSnapshot)
//!   and serializes all mutations through a single writer lock
//! - [`KeyValueStore`] is the persistence port; [`MemoryStore`] and
//!   [`FileStore`] implement it
//! - [`CartHandle`] is the consumer-facing reference, which fails with
//!   [`UsageError`] when no store is alive behind it
//! - The whole cart is one JSON record under a single well-known key
//!
//! # Example
//!
//! ```rust,no_run
//! use gomarket_cart::{CartConfig, CartStore, MemoryStore};
//! use gomarket_core::{NewLineItem, ProductId};
//!
//! # async fn demo() -> Result<(), gomarket_cart::CartError> {
//! let config = CartConfig::default();
//! let store = CartStore::open(MemoryStore::new(), &config).await;
//!
//! store
//!     .add_to_cart(NewLineItem {
//!         id: ProductId::new("p1"),
//!         title: "Tomato".to_string(),
//!         image_url: "https://img.example/tomato.png".to_string(),
//!         price: "2.50".parse().expect("valid price"),
//!     })
//!     .await?;
//!
//! assert_eq!(store.snapshot().len(), 1);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod config;
pub mod error;
pub mod handle;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError, DEFAULT_STORAGE_KEY};
pub use error::{CartError, DecodeError, StorageError, UsageError};
pub use handle::CartHandle;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{CartStore, StoreStatus};
