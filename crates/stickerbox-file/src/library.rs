//! A sticker library rooted at one directory.

use std::path::Path;

use tracing::instrument;

use stickerbox_core::error::{InvalidInputError, NotFoundError};
use stickerbox_core::traits::{EmoteSource, MembershipStore};
use stickerbox_core::types::{CollectionId, Emote, Sticker, StickerId};
use stickerbox_core::usecase::{DeleteSticker, SaveSticker};
use stickerbox_core::Result;

use crate::blobs::FileBlobStore;
use crate::collections::FileCollectionStore;
use crate::export::{self, ExportedPack};
use crate::stickers::FileStickerStore;
use crate::store::FileStore;

/// The record, collection and blob stores of one library directory.
#[derive(Debug, Clone)]
pub struct FileLibrary {
    store: FileStore,
    stickers: FileStickerStore,
    collections: FileCollectionStore,
    blobs: FileBlobStore,
}

impl FileLibrary {
    /// Open the library at `root`. Directories are created on first write.
    pub fn open(root: impl AsRef<Path>) -> Self {
        let store = FileStore::new(root);
        Self {
            stickers: FileStickerStore::new(store.clone()),
            collections: FileCollectionStore::new(store.clone()),
            blobs: FileBlobStore::new(store.clone()),
            store,
        }
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn stickers(&self) -> &FileStickerStore {
        &self.stickers
    }

    pub fn collections(&self) -> &FileCollectionStore {
        &self.collections
    }

    pub fn blobs(&self) -> &FileBlobStore {
        &self.blobs
    }

    /// Find a sticker in either partition, failing if it does not exist.
    pub async fn require_sticker(&self, id: &StickerId) -> Result<Sticker> {
        self.stickers
            .locate(id)
            .await?
            .ok_or_else(|| NotFoundError::Sticker { id: id.to_string() }.into())
    }

    /// Download `emote` from `source` and save it as a sticker.
    pub async fn save_sticker<S: EmoteSource>(
        &self,
        source: S,
        emote: &Emote,
        name: Option<String>,
    ) -> Result<Sticker> {
        SaveSticker::new(source, self.stickers.clone(), self.blobs.clone())
            .execute(emote, name)
            .await
    }

    /// Delete a sticker from its collections, the record store and the blob store.
    pub async fn delete_sticker(&self, sticker: &Sticker) -> Result<()> {
        DeleteSticker::new(
            self.collections.clone(),
            self.stickers.clone(),
            self.blobs.clone(),
        )
        .execute(sticker)
        .await?;

        Ok(())
    }

    /// Add an existing sticker to an existing collection of the same kind.
    #[instrument(skip(self))]
    pub async fn add_to_collection(
        &self,
        collection: &CollectionId,
        sticker: &StickerId,
    ) -> Result<()> {
        let target = self.collections.require(collection)?;
        let sticker = self.require_sticker(sticker).await?;

        if sticker.kind() != target.kind {
            return Err(InvalidInputError::KindMismatch {
                sticker_id: sticker.id.to_string(),
                sticker_kind: sticker.kind().to_string(),
                collection_id: target.id.to_string(),
                collection_kind: target.kind.to_string(),
            }
            .into());
        }

        self.collections.add_member(collection, &sticker.id).await
    }

    /// Export a collection as a sticker pack into `dest`.
    pub async fn export_collection(
        &self,
        collection: &CollectionId,
        dest: impl AsRef<Path>,
    ) -> Result<ExportedPack> {
        export::export_collection(self, collection, dest.as_ref()).await
    }
}
