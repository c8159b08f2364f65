//! File-backed collections and membership store.

use std::fs;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use stickerbox_core::{Error, Result};
use stickerbox_core::error::{NotFoundError, StorageError};
use stickerbox_core::traits::MembershipStore;
use stickerbox_core::types::{
    Collection, CollectionId, Membership, StickerId, StickerKind, validate_name,
};

use crate::store::{FileStore, map_io};

/// Collections stored as one JSON file each.
///
/// Every read-modify-write of a collection file runs under the library's
/// collections lock.
#[derive(Debug, Clone)]
pub struct FileCollectionStore {
    store: FileStore,
}

impl FileCollectionStore {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub fn create(&self, name: &str, kind: StickerKind) -> Result<Collection> {
        let collection = Collection::new(name, kind)?;
        let path = self.store.collection_path(&collection.id);

        self.store
            .with_collections_lock(|| self.store.write_json(&path, &collection))?;

        debug!(id = %collection.id, "Created collection");

        Ok(collection)
    }

    pub fn get(&self, id: &CollectionId) -> Result<Option<Collection>> {
        self.store.read_json(&self.store.collection_path(id))
    }

    /// Get a collection, failing if it does not exist.
    pub fn require(&self, id: &CollectionId) -> Result<Collection> {
        self.get(id)?.ok_or_else(|| {
            NotFoundError::Collection {
                id: id.to_string(),
            }
            .into()
        })
    }

    /// All collections, oldest first.
    pub fn list(&self) -> Result<Vec<Collection>> {
        let mut collections = self.load_all()?;
        collections.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(collections)
    }

    #[instrument(skip(self))]
    pub fn rename(&self, id: &CollectionId, name: &str) -> Result<Collection> {
        let name = validate_name(name)?;

        self.store.with_collections_lock(|| {
            let mut collection = self.require(id)?;
            collection.name = name;
            self.store
                .write_json(&self.store.collection_path(id), &collection)?;
            Ok(collection)
        })
    }

    /// Delete a collection. The stickers in it are not touched.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &CollectionId) -> Result<()> {
        let path = self.store.collection_path(id);

        self.store.with_collections_lock(|| {
            if !path.exists() {
                return Err(NotFoundError::Collection {
                    id: id.to_string(),
                }
                .into());
            }
            fs::remove_file(&path).map_err(|e| map_io(&path, e))
        })?;

        debug!("Deleted collection");

        Ok(())
    }

    /// Remove a sticker from one collection. Returns false if it was not in it.
    #[instrument(skip(self))]
    pub fn remove_member_from(&self, id: &CollectionId, sticker: &StickerId) -> Result<bool> {
        self.store.with_collections_lock(|| {
            let mut collection = self.require(id)?;
            let removed = collection.remove(sticker);
            if removed {
                self.store
                    .write_json(&self.store.collection_path(id), &collection)?;
            }
            Ok(removed)
        })
    }

    /// Every collection on disk, in file name order. Unreadable files are skipped.
    fn load_all(&self) -> Result<Vec<Collection>> {
        let mut collections = Vec::new();

        for path in self.store.json_entries(&self.store.collections_dir())? {
            match self.store.read_json::<Collection>(&path) {
                Ok(Some(collection)) => collections.push(collection),
                Ok(None) => {}
                Err(err) => warn!(path = %path.display(), error = %err, "Skipping unreadable collection"),
            }
        }

        Ok(collections)
    }

    /// Write back the originals of collections already updated by a failed
    /// multi-collection change. Must run under the collections lock.
    fn roll_back(&self, updated: Vec<(Collection, Membership)>, cause: Error) -> Error {
        let mut unrestored = Vec::new();

        for (original, membership) in updated {
            let path = self.store.collection_path(&original.id);
            if let Err(err) = self.store.write_json(&path, &original) {
                warn!(collection = %original.id, error = %err, "Failed to roll back collection");
                unrestored.push(membership);
            }
        }

        if unrestored.is_empty() {
            cause
        } else {
            StorageError::Incomplete {
                message: cause.to_string(),
                unrestored,
            }
            .into()
        }
    }
}

#[async_trait]
impl MembershipStore for FileCollectionStore {
    #[instrument(skip(self))]
    async fn remove_member(
        &self,
        kind: StickerKind,
        sticker: &StickerId,
    ) -> Result<Vec<Membership>> {
        self.store.with_collections_lock(|| {
            let mut updated: Vec<(Collection, Membership)> = Vec::new();

            for mut collection in self.load_all()? {
                if collection.kind != kind {
                    continue;
                }
                let Some(position) = collection.position(sticker) else {
                    continue;
                };
                let original = collection.clone();
                collection.remove(sticker);

                let path = self.store.collection_path(&collection.id);
                if let Err(err) = self.store.write_json(&path, &collection) {
                    warn!(collection = %collection.id, error = %err, "Failed to update collection, rolling back");
                    return Err(self.roll_back(updated, err));
                }
                updated.push((
                    original,
                    Membership {
                        collection: collection.id,
                        position,
                    },
                ));
            }

            debug!(count = updated.len(), "Removed sticker from collections");

            Ok(updated.into_iter().map(|(_, membership)| membership).collect())
        })
    }

    #[instrument(skip(self))]
    async fn add_member(&self, collection: &CollectionId, sticker: &StickerId) -> Result<()> {
        self.store.with_collections_lock(|| {
            let mut target = self.require(collection)?;
            if target.insert(sticker.clone()) {
                self.store
                    .write_json(&self.store.collection_path(collection), &target)?;
                debug!("Added sticker to collection");
            }
            Ok(())
        })
    }

    #[instrument(skip(self))]
    async fn restore_member(&self, membership: &Membership, sticker: &StickerId) -> Result<()> {
        let collection = &membership.collection;

        self.store.with_collections_lock(|| {
            let mut target = self.require(collection)?;
            if target.insert_at(membership.position, sticker.clone()) {
                self.store
                    .write_json(&self.store.collection_path(collection), &target)?;
                debug!("Restored sticker to collection");
            }
            Ok(())
        })
    }
}
