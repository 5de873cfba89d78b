//! Error types for the cart store.
//!
//! Each concern gets its own enum; [`CartError`] composes the ones a mutation
//! can hit. Load failures ([`StorageError`] on read, [`DecodeError`]) never
//! reach callers: the store recovers to an empty cart and logs a warning.

use gomarket_core::SnapshotError;
use thiserror::Error;

/// Persistence adapter failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem or other I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be stored by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Persisted bytes could not be turned back into a cart.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not a JSON array of line items (includes zero quantities).
    #[error("Malformed cart record: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed items that violate a cart invariant.
    #[error("Invalid cart record: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// The cart was accessed through a handle with no live store behind it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    /// The handle is detached or its store has been dropped.
    #[error("cart handle used without an active CartStore")]
    NoActiveStore,
}

/// Error returned by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Writing the new cart to storage failed; the cart was not changed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serializing the new cart failed; the cart was not changed.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// No active store.
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::from(StorageError::Backend("quota exceeded".to_string()));
        assert_eq!(
            err.to_string(),
            "Storage error: Storage backend error: quota exceeded"
        );

        let err = CartError::from(UsageError::NoActiveStore);
        assert_eq!(
            err.to_string(),
            "Usage error: cart handle used without an active CartStore"
        );
    }

    #[test]
    fn test_decode_error_from_snapshot_error() {
        let err = DecodeError::from(SnapshotError::DuplicateId("p1".into()));
        assert_eq!(
            err.to_string(),
            "Invalid cart record: duplicate line item id: p1"
        );
    }
}
