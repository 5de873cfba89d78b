//! The cart store: authoritative in-memory cart mirrored to storage.
//!
//! # Write path
//!
//! Every mutation runs the same sequence while holding the writer lock:
//!
//! 1. Read the current snapshot (never a copy captured earlier)
//! 2. Compute the next snapshot with a pure transition from `gomarket_core`
//! 3. If nothing changed, stop: no write, no publish
//! 4. Encode and write the whole cart under the storage key
//! 5. On success, replace the current snapshot and publish it to subscribers
//!
//! The lock is a `tokio::sync::Mutex`, which grants access in FIFO order, so
//! overlapping calls apply in the order they were made and each one sees the
//! result of the one before it. A failed write returns the error and leaves
//! both the current and the published snapshot untouched.
//!
//! # Loading
//!
//! [`CartStore::new`] reserves the writer lock for the loader before the store
//! is handed out. Mutations issued before [`CartStore::initialize`] finishes
//! queue behind the load and therefore apply to the persisted cart, not to
//! the empty placeholder. Load failures of any kind fall back to an empty cart.

use std::fmt;
use std::sync::Arc;

use gomarket_core::{CartSnapshot, NewLineItem, ProductId};
use tokio::sync::{Mutex, OwnedMutexGuard, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, instrument, warn};

use crate::codec;
use crate::config::CartConfig;
use crate::error::Result;
use crate::handle::CartHandle;
use crate::storage::{FileStore, KeyValueStore};

/// Lifecycle of a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreStatus {
    /// Created; the persisted cart has not been read yet.
    Uninitialized,
    /// Reading the persisted cart.
    Loading,
    /// Loaded; mutations apply immediately.
    Ready,
}

/// Shared cart store.
///
/// Cheaply cloneable via `Arc`; all clones operate on the same cart.
#[derive(Clone)]
pub struct CartStore {
    pub(crate) inner: Arc<CartStoreInner>,
}

pub(crate) struct CartStoreInner {
    storage: Box<dyn KeyValueStore>,
    key: String,
    /// Writer slot holding the authoritative snapshot.
    current: Arc<Mutex<CartSnapshot>>,
    /// Writer slot reserved for the loader until initialization runs.
    loader: Mutex<Option<OwnedMutexGuard<CartSnapshot>>>,
    published: watch::Sender<CartSnapshot>,
    status: watch::Sender<StoreStatus>,
}

impl CartStore {
    /// Create a store over `storage` without loading it.
    ///
    /// The store starts [`StoreStatus::Uninitialized`] with an empty cart.
    /// Mutations wait until [`initialize`](Self::initialize) has run: on a
    /// store that is never initialized they never complete. Prefer
    /// [`open`](Self::open), or call [`spawn_initialize`](Self::spawn_initialize)
    /// right after construction.
    #[must_use]
    pub fn new<S>(storage: S, config: &CartConfig) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let current = Arc::new(Mutex::new(CartSnapshot::empty()));
        let reserved = Arc::clone(&current).try_lock_owned().ok();
        let (published, _) = watch::channel(CartSnapshot::empty());
        let (status, _) = watch::channel(StoreStatus::Uninitialized);

        Self {
            inner: Arc::new(CartStoreInner {
                storage: Box::new(storage),
                key: config.storage_key.clone(),
                current,
                loader: Mutex::new(reserved),
                published,
                status,
            }),
        }
    }

    /// Create a store over `storage` and load the persisted cart.
    pub async fn open<S>(storage: S, config: &CartConfig) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let store = Self::new(storage, config);
        store.initialize().await;
        store
    }

    /// Open a store backed by a [`FileStore`] in `config.data_dir`.
    pub async fn open_file(config: &CartConfig) -> Self {
        Self::open(FileStore::new(&config.data_dir), config).await
    }

    /// Load the persisted cart and publish it.
    ///
    /// Runs the load once; later calls wait until the store is ready. The
    /// load runs on its own task that owns the reserved writer slot, so
    /// dropping this future (a timeout, `select!`) does not abandon it:
    /// queued mutations still see the loaded cart.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn initialize(&self) {
        let reserved = self.inner.loader.lock().await.take();
        let Some(slot) = reserved else {
            self.ready().await;
            return;
        };

        let store = self.clone();
        let load = tokio::spawn(async move { store.load_into(slot).await }.in_current_span());
        if let Err(e) = load.await {
            error!(error = %e, "Cart load task failed");
        }
    }

    /// Run [`initialize`](Self::initialize) on a background task.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use = "the handle can be awaited to observe load completion"]
    pub fn spawn_initialize(&self) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move { store.initialize().await })
    }

    /// Wait until the persisted cart has been loaded.
    pub async fn ready(&self) {
        let mut status = self.inner.status.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting.
        let _ = status.wait_for(|s| *s == StoreStatus::Ready).await;
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> StoreStatus {
        *self.inner.status.borrow()
    }

    /// Storage key holding this cart.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.published.borrow().clone()
    }

    /// Observe every published snapshot.
    ///
    /// The receiver starts at the current snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.published.subscribe()
    }

    /// A consumer handle that does not keep the store alive.
    #[must_use]
    pub fn handle(&self) -> CartHandle {
        CartHandle::new(Arc::downgrade(&self.inner))
    }

    /// Add a product to the cart.
    ///
    /// Increments the existing line item if the product is already in the
    /// cart, otherwise appends it with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the updated cart cannot be persisted. The cart
    /// is unchanged in that case.
    #[instrument(skip(self, product), fields(key = %self.inner.key, id = %product.id))]
    pub async fn add_to_cart(&self, product: NewLineItem) -> Result<()> {
        self.apply(|cart| cart.with_added(product)).await
    }

    /// Increment the quantity of the line item with `id`.
    ///
    /// Unknown IDs are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the updated cart cannot be persisted.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn increment(&self, id: &ProductId) -> Result<()> {
        self.apply(|cart| cart.with_incremented(id)).await
    }

    /// Decrement the quantity of the line item with `id`.
    ///
    /// Items at quantity 1 and unknown IDs are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the updated cart cannot be persisted.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn decrement(&self, id: &ProductId) -> Result<()> {
        self.apply(|cart| cart.with_decremented(id)).await
    }

    /// Read, transition, persist and publish under the writer lock.
    async fn apply<F>(&self, transition: F) -> Result<()>
    where
        F: FnOnce(&CartSnapshot) -> Option<CartSnapshot>,
    {
        let mut current = self.inner.current.lock().await;

        let Some(next) = transition(&*current) else {
            debug!("Cart unchanged, skipping write");
            return Ok(());
        };

        let bytes = codec::encode(&next)?;
        if let Err(e) = self.inner.storage.set(&self.inner.key, bytes).await {
            error!(error = %e, "Failed to persist cart");
            return Err(e.into());
        }

        debug!(items = next.len(), quantity = next.total_quantity(), "Cart updated");
        *current = next.clone();
        self.inner.published.send_replace(next);
        Ok(())
    }

    /// Fill the reserved writer slot with the persisted cart.
    ///
    /// The slot is released when this returns, letting queued mutations in.
    async fn load_into(&self, mut slot: OwnedMutexGuard<CartSnapshot>) {
        self.inner.status.send_replace(StoreStatus::Loading);
        let loaded = self.load().await;
        info!(items = loaded.len(), "Cart loaded");

        *slot = loaded.clone();
        self.inner.published.send_replace(loaded);
        self.inner.status.send_replace(StoreStatus::Ready);
    }

    /// Read the persisted cart, falling back to an empty one.
    async fn load(&self) -> CartSnapshot {
        match self.inner.storage.get(&self.inner.key).await {
            Ok(Some(bytes)) => codec::decode(&bytes).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable cart record");
                CartSnapshot::empty()
            }),
            Ok(None) => {
                debug!("No persisted cart");
                CartSnapshot::empty()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart");
                CartSnapshot::empty()
            }
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("status", &self.status())
            .field("items", &self.inner.published.borrow().len())
            .finish_non_exhaustive()
    }
}
