//! Filesystem-backed key-value store.
//!
//! [`FileStore`] keeps each key in its own file so the cart survives process
//! restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── %40GoMarket%3Aproducts     # URL-encoded key, raw value bytes
//! ```
//!
//! Writes go to `<file>.tmp` first and are renamed into place, so a reader
//! sees either the previous value or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::KeyValueStore;
use crate::error::StorageError;

/// Filesystem-backed key-value store.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The directory holding the stored files.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// File path for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` for keys that would not map to a
    /// single file inside the base directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let encoded = urlencoding::encode(key);
        if encoded.is_empty() || encoded == "." || encoded == ".." {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base.join(encoded.as_ref()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");

        tokio::fs::create_dir_all(&self.base).await?;
        let written = match tokio::fs::write(&tmp, &value).await {
            Ok(()) => tokio::fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(path = %path.display(), bytes = value.len(), "Wrote cart record");
        Ok(())
    }
}
