//! In-memory key-value store.
//!
//! Holds values in a shared map and never touches the filesystem. Clones see
//! each other's writes, which lets tests inspect what a store persisted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::error::StorageError;

/// In-memory key-value store for tests and ephemeral carts.
///
/// Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let entries = HashMap::from([(key.into(), value.into())]);
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}
