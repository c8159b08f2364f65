//! File-backed sticker record store.

use std::fs;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use stickerbox_core::Result;
use stickerbox_core::error::NotFoundError;
use stickerbox_core::traits::{StickerPage, StickerStore};
use stickerbox_core::types::{EmoteId, Sticker, StickerId, StickerKind, validate_name};

use crate::store::{FileStore, map_io};

const DEFAULT_PAGE_SIZE: u32 = 50;

/// Sticker records stored as one JSON file each.
#[derive(Debug, Clone)]
pub struct FileStickerStore {
    store: FileStore,
}

impl FileStickerStore {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Find a sticker by id in either partition.
    pub async fn locate(&self, id: &StickerId) -> Result<Option<Sticker>> {
        for kind in StickerKind::ALL {
            if let Some(sticker) = self.get(kind, id).await? {
                return Ok(Some(sticker));
            }
        }
        Ok(None)
    }

    /// Every record of one kind, ordered by id. Unreadable files are skipped.
    fn load_all(&self, kind: StickerKind) -> Result<Vec<Sticker>> {
        let dir = self.store.stickers_dir(kind);
        let mut stickers = Vec::new();

        for path in self.store.json_entries(&dir)? {
            match self.store.read_json::<Sticker>(&path) {
                Ok(Some(sticker)) => stickers.push(sticker),
                Ok(None) => {}
                Err(err) => warn!(path = %path.display(), error = %err, "Skipping unreadable sticker record"),
            }
        }

        Ok(stickers)
    }
}

#[async_trait]
impl StickerStore for FileStickerStore {
    #[instrument(skip(self, sticker), fields(sticker = %sticker.id))]
    async fn insert(&self, sticker: &Sticker) -> Result<()> {
        let path = self.store.sticker_path(sticker.kind(), &sticker.id);
        self.store.write_json(&path, sticker)?;

        debug!("Wrote sticker record");

        Ok(())
    }

    async fn get(&self, kind: StickerKind, id: &StickerId) -> Result<Option<Sticker>> {
        let path = self.store.sticker_path(kind, id);
        self.store.read_json(&path)
    }

    #[instrument(skip(self))]
    async fn delete(&self, kind: StickerKind, id: &StickerId) -> Result<()> {
        let path = self.store.sticker_path(kind, id);

        if !path.exists() {
            return Err(NotFoundError::Sticker { id: id.to_string() }.into());
        }

        fs::remove_file(&path).map_err(|e| map_io(&path, e))?;

        debug!("Deleted sticker record");

        Ok(())
    }

    async fn find_by_emote(&self, kind: StickerKind, emote: &EmoteId) -> Result<Option<Sticker>> {
        Ok(self
            .load_all(kind)?
            .into_iter()
            .find(|sticker| &sticker.emote.id == emote))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        kind: StickerKind,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<StickerPage> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE) as usize;
        let all = self.load_all(kind)?;

        let start_idx = match cursor {
            Some(cursor) => all
                .iter()
                .position(|s| s.id.as_str() > cursor)
                .unwrap_or(all.len()),
            None => 0,
        };

        let stickers: Vec<Sticker> = all.into_iter().skip(start_idx).take(limit).collect();

        let cursor = if limit > 0 && stickers.len() == limit {
            stickers.last().map(|s| s.id.to_string())
        } else {
            None
        };

        Ok(StickerPage { stickers, cursor })
    }

    #[instrument(skip(self))]
    async fn rename(&self, kind: StickerKind, id: &StickerId, name: &str) -> Result<Sticker> {
        let name = validate_name(name)?;
        let path = self.store.sticker_path(kind, id);

        let mut sticker: Sticker = self
            .store
            .read_json(&path)?
            .ok_or_else(|| NotFoundError::Sticker { id: id.to_string() })?;

        sticker.name = name;
        self.store.write_json(&path, &sticker)?;

        debug!(name = %sticker.name, "Renamed sticker");

        Ok(sticker)
    }
}
