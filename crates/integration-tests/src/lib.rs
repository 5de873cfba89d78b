//! Integration tests for the GoMarket cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gomarket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Basic add/increment/decrement and load scenarios
//! - `cart_properties` - Randomized sequences checked against persisted state
//! - `cart_concurrency` - Overlapping mutations and mutations during load
//! - `cart_failures` - Storage failures, unreadable records, detached handles
//! - `file_store` - File-backed carts across reopen
//!
//! This library holds the shared fixtures: product builders and storage
//! doubles that add latency or inject failures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use gomarket_cart::{CartStore, KeyValueStore, MemoryStore, StorageError, codec};
use gomarket_core::{CartSnapshot, NewLineItem, ProductId, UnitPrice};
use rust_decimal::Decimal;

/// Build a product with a predictable title, image and price.
#[must_use]
pub fn product(id: &str) -> NewLineItem {
    NewLineItem {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        image_url: format!("https://img.example/{id}.png"),
        price: UnitPrice::new(Decimal::new(250, 2)),
    }
}

/// `(id, quantity)` pairs in cart order.
#[must_use]
pub fn quantities(snapshot: &CartSnapshot) -> Vec<(String, u32)> {
    snapshot
        .iter()
        .map(|item| (item.id.to_string(), item.quantity.get()))
        .collect()
}

/// Decode whatever is currently persisted for `store`.
///
/// Returns `None` if nothing has been written yet.
///
/// # Panics
///
/// Panics if the storage read fails or the record cannot be decoded.
pub async fn persisted<S: KeyValueStore>(storage: &S, store: &CartStore) -> Option<CartSnapshot> {
    let bytes = storage
        .get(store.key())
        .await
        .expect("storage read should succeed")?;
    Some(codec::decode(&bytes).expect("persisted record should decode"))
}

/// A unique scratch directory for file-backed tests.
#[must_use]
pub fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gomarket_it_{}_{name}", std::process::id()))
}

// =============================================================================
// Storage Doubles
// =============================================================================

/// Memory-backed store that sleeps before every read and write.
#[derive(Clone, Debug)]
pub struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl SlowStore {
    #[must_use]
    pub const fn new(inner: MemoryStore, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl KeyValueStore for SlowStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.set(key, value).await
    }
}

/// Memory-backed store whose reads and writes can be switched to fail.
#[derive(Clone, Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FailingStore {
    #[must_use]
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("read failed".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.inner.set(key, value).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
