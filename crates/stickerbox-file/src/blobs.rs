//! File-backed blob store.

use std::fs;
use std::io::ErrorKind;

use async_trait::async_trait;
use tracing::{debug, instrument};

use stickerbox_core::Result;
use stickerbox_core::traits::BlobStore;

use crate::store::{FileStore, map_io};

/// Image blobs stored as plain files under the library root.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    store: FileStore,
}

impl FileBlobStore {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.store.blob_path(path)?;
        self.store.write_atomic(&full, bytes)?;

        debug!("Wrote blob");

        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.store.blob_path(path)?;
        fs::read(&full).map_err(|e| map_io(&full, e))
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.store.blob_path(path)?.is_file())
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<()> {
        let full = self.store.blob_path(path)?;

        match fs::remove_file(&full) {
            Ok(()) => {
                debug!("Deleted blob");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("Blob already absent");
                Ok(())
            }
            Err(err) => Err(map_io(&full, err)),
        }
    }
}
