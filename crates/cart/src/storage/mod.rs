//! Persistence port for the cart.
//!
//! The cart treats durable storage as a plain key-value blob store: one
//! `get` and one `set`, both asynchronous and both fallible. The whole cart
//! lives under a single key, so a backend never sees partial carts.
//!
//! Implementations:
//! - [`MemoryStore`]: process-local `HashMap`, shared between clones
//! - [`FileStore`]: one file per key under a base directory

use async_trait::async_trait;

use crate::error::StorageError;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Asynchronous key-value blob storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `None` if nothing has been stored under the key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}
