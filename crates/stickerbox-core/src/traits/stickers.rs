//! Sticker record store trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{EmoteId, Sticker, StickerId, StickerKind};

/// One page of sticker records.
#[derive(Debug, Clone)]
pub struct StickerPage {
    /// The stickers in this page, ordered by id.
    pub stickers: Vec<Sticker>,

    /// Cursor for the next page, if more stickers may exist.
    pub cursor: Option<String>,
}

/// Primary store of sticker records, partitioned by [`StickerKind`].
#[async_trait]
pub trait StickerStore: Send + Sync {
    /// Insert a record, replacing any record with the same id.
    async fn insert(&self, sticker: &Sticker) -> Result<()>;

    /// Fetch a record, or `None` if it does not exist.
    async fn get(&self, kind: StickerKind, id: &StickerId) -> Result<Option<Sticker>>;

    /// Delete a record.
    ///
    /// Fails with `NotFoundError::Sticker` if there is no such record.
    async fn delete(&self, kind: StickerKind, id: &StickerId) -> Result<()>;

    /// Find the sticker saved from a given remote emote.
    async fn find_by_emote(&self, kind: StickerKind, emote: &EmoteId) -> Result<Option<Sticker>>;

    /// List records of one kind after `cursor`.
    async fn list(
        &self,
        kind: StickerKind,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<StickerPage>;

    /// Change a sticker's display name and return the updated record.
    async fn rename(&self, kind: StickerKind, id: &StickerId, name: &str) -> Result<Sticker>;
}
