//! In-memory stores with failure injection, for workflow tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::Result;
use crate::error::{Error, NotFoundError, StorageError};
use crate::traits::{BlobStore, EmoteSource, MembershipStore, StickerPage, StickerStore};
use crate::types::{
    CollectionId, Emote, EmoteId, EmoteRef, ImageMeta, Membership, Sticker, StickerId,
    StickerKind,
};

fn injected(what: &str) -> Error {
    StorageError::Io {
        path: "memory".to_string(),
        message: format!("injected {} failure", what),
    }
    .into()
}

pub(crate) fn collection_id(s: &str) -> CollectionId {
    CollectionId::new(s).unwrap()
}

pub(crate) fn sample_emote(emote: &str, animated: bool) -> Emote {
    Emote {
        id: EmoteId::new(emote).unwrap(),
        name: format!("{}_name", emote),
        owner: None,
        animated,
        width: 64,
        height: 64,
        image_url: format!("https://cdn.example/{}.webp", emote),
    }
}

pub(crate) fn sample_sticker(id: &str, emote: &str, animated: bool) -> Sticker {
    Sticker {
        id: StickerId::new(id).unwrap(),
        name: format!("{} sticker", id),
        animated,
        image: ImageMeta {
            width: 64,
            height: 64,
            size_bytes: 4,
        },
        emote: EmoteRef {
            id: EmoteId::new(emote).unwrap(),
            name: emote.to_string(),
            owner: Some("owner".to_string()),
        },
        created_at: Utc::now(),
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryMembership {
    collections: Arc<Mutex<BTreeMap<CollectionId, (StickerKind, Vec<StickerId>)>>>,
    fail_remove: Arc<AtomicBool>,
    fail_remove_partway: Arc<AtomicBool>,
    fail_add: Arc<AtomicBool>,
}

impl MemoryMembership {
    pub fn create(&self, id: &CollectionId, kind: StickerKind) {
        self.collections
            .lock()
            .unwrap()
            .insert(id.clone(), (kind, Vec::new()));
    }

    pub fn contains(&self, collection: &CollectionId, sticker: &StickerId) -> bool {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .is_some_and(|(_, members)| members.contains(sticker))
    }

    pub fn members(&self, collection: &CollectionId) -> Vec<StickerId> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|(_, members)| members.clone())
            .unwrap_or_default()
    }

    pub fn fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    /// Fail after the first collection is updated, leaving it modified.
    pub fn fail_remove_partway(&self, fail: bool) {
        self.fail_remove_partway.store(fail, Ordering::SeqCst);
    }

    pub fn fail_add(&self, fail: bool) {
        self.fail_add.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MembershipStore for MemoryMembership {
    async fn remove_member(
        &self,
        kind: StickerKind,
        sticker: &StickerId,
    ) -> Result<Vec<Membership>> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(injected("membership removal"));
        }
        let partway = self.fail_remove_partway.load(Ordering::SeqCst);
        let mut removed = Vec::new();
        for (id, (collection_kind, members)) in self.collections.lock().unwrap().iter_mut() {
            if *collection_kind != kind {
                continue;
            }
            let Some(position) = members.iter().position(|m| m == sticker) else {
                continue;
            };
            members.remove(position);
            removed.push(Membership {
                collection: id.clone(),
                position,
            });
            if partway {
                return Err(StorageError::Incomplete {
                    message: "injected membership removal failure".to_string(),
                    unrestored: removed,
                }
                .into());
            }
        }
        Ok(removed)
    }

    async fn add_member(&self, collection: &CollectionId, sticker: &StickerId) -> Result<()> {
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(injected("membership add"));
        }
        let mut collections = self.collections.lock().unwrap();
        let (_, members) = collections
            .get_mut(collection)
            .ok_or_else(|| NotFoundError::Collection {
                id: collection.to_string(),
            })?;
        if !members.contains(sticker) {
            members.push(sticker.clone());
        }
        Ok(())
    }

    async fn restore_member(&self, membership: &Membership, sticker: &StickerId) -> Result<()> {
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(injected("membership add"));
        }
        let mut collections = self.collections.lock().unwrap();
        let (_, members) = collections
            .get_mut(&membership.collection)
            .ok_or_else(|| NotFoundError::Collection {
                id: membership.collection.to_string(),
            })?;
        if !members.contains(sticker) {
            let position = membership.position.min(members.len());
            members.insert(position, sticker.clone());
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryStickers {
    records: Arc<Mutex<BTreeMap<(StickerKind, StickerId), Sticker>>>,
    fail_delete: Arc<AtomicBool>,
    fail_insert: Arc<AtomicBool>,
}

impl MemoryStickers {
    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl StickerStore for MemoryStickers {
    async fn insert(&self, sticker: &Sticker) -> Result<()> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(injected("record insert"));
        }
        self.records
            .lock()
            .unwrap()
            .insert((sticker.kind(), sticker.id.clone()), sticker.clone());
        Ok(())
    }

    async fn get(&self, kind: StickerKind, id: &StickerId) -> Result<Option<Sticker>> {
        Ok(self.records.lock().unwrap().get(&(kind, id.clone())).cloned())
    }

    async fn delete(&self, kind: StickerKind, id: &StickerId) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(injected("record delete"));
        }
        self.records
            .lock()
            .unwrap()
            .remove(&(kind, id.clone()))
            .map(|_| ())
            .ok_or_else(|| NotFoundError::Sticker { id: id.to_string() }.into())
    }

    async fn find_by_emote(&self, kind: StickerKind, emote: &EmoteId) -> Result<Option<Sticker>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|s| s.kind() == kind && &s.emote.id == emote)
            .cloned())
    }

    async fn list(
        &self,
        kind: StickerKind,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<StickerPage> {
        let limit = limit.unwrap_or(50) as usize;
        let stickers: Vec<Sticker> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.kind() == kind)
            .filter(|s| cursor.is_none_or(|c| s.id.as_str() > c))
            .take(limit)
            .cloned()
            .collect();
        let cursor = if stickers.len() == limit {
            stickers.last().map(|s| s.id.to_string())
        } else {
            None
        };
        Ok(StickerPage { stickers, cursor })
    }

    async fn rename(&self, kind: StickerKind, id: &StickerId, name: &str) -> Result<Sticker> {
        let mut records = self.records.lock().unwrap();
        let sticker = records
            .get_mut(&(kind, id.clone()))
            .ok_or_else(|| NotFoundError::Sticker { id: id.to_string() })?;
        sticker.name = name.to_string();
        Ok(sticker.clone())
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryBlobs {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_write: Arc<AtomicBool>,
    fail_delete: Arc<AtomicBool>,
}

impl MemoryBlobs {
    pub fn fail_write(&self, fail: bool) {
        self.fail_write.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for MemoryBlobs {
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(injected("blob write"));
        }
        self.blobs
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| injected("blob read"))
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.blobs.lock().unwrap().contains_key(path))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(injected("blob delete"));
        }
        self.blobs.lock().unwrap().remove(path);
        Ok(())
    }
}

/// Emote source serving fixed image bytes for every emote.
#[derive(Clone, Default)]
pub(crate) struct MemoryEmotes {
    pub bytes: Vec<u8>,
}

#[async_trait]
impl EmoteSource for MemoryEmotes {
    async fn search(&self, _query: &str, _page: u32, _limit: u32) -> Result<Option<Vec<Emote>>> {
        Ok(Some(Vec::new()))
    }

    async fn get(&self, id: &EmoteId) -> Result<Emote> {
        Ok(sample_emote(id.as_str(), false))
    }

    async fn download(&self, _emote: &Emote) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
