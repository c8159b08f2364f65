//! Blob storage trait.

use async_trait::async_trait;

use crate::Result;

/// Storage for sticker image blobs, addressed by relative path.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write a blob, replacing any existing content.
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Read a blob.
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Check whether a blob exists.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Delete a blob. Deleting a missing blob succeeds.
    async fn delete(&self, path: &str) -> Result<()>;
}
