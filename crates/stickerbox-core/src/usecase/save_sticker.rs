//! Saving a remote emote as a local sticker.

use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::error::InvalidInputError;
use crate::traits::{BlobStore, EmoteSource, StickerStore};
use crate::types::{Emote, Sticker, validate_name};

/// Downloads an emote image and stores it as a new sticker.
///
/// The blob is written before the record. If the record insert fails the
/// blob is removed again, so a failed save leaves nothing behind.
#[derive(Debug, Clone)]
pub struct SaveSticker<S, R, B> {
    source: S,
    records: R,
    blobs: B,
}

impl<S, R, B> SaveSticker<S, R, B>
where
    S: EmoteSource,
    R: StickerStore,
    B: BlobStore,
{
    pub fn new(source: S, records: R, blobs: B) -> Self {
        Self {
            source,
            records,
            blobs,
        }
    }

    /// Save `emote`, optionally under a custom display name.
    #[instrument(skip(self, emote), fields(emote = %emote.id))]
    pub async fn execute(&self, emote: &Emote, name: Option<String>) -> Result<Sticker> {
        if let Some(name) = &name {
            validate_name(name.as_str())?;
        }

        if let Some(existing) = self.records.find_by_emote(emote.kind(), &emote.id).await? {
            return Err(InvalidInputError::AlreadySaved {
                emote_id: emote.id.to_string(),
                sticker_id: existing.id.to_string(),
            }
            .into());
        }

        let bytes = self.source.download(emote).await?;
        if bytes.is_empty() {
            return Err(InvalidInputError::EmptyDownload {
                emote_id: emote.id.to_string(),
            }
            .into());
        }
        debug!(size = bytes.len(), "Downloaded emote image");

        let sticker = Sticker::from_emote(emote, name, bytes.len() as u64)?;
        let blob_path = sticker.blob_path();
        self.blobs.write(&blob_path, &bytes).await?;

        if let Err(err) = self.records.insert(&sticker).await {
            warn!(error = %err, "Failed to insert sticker record, removing image");
            if let Err(cleanup) = self.blobs.delete(&blob_path).await {
                warn!(error = %cleanup, path = %blob_path, "Failed to remove orphaned image");
            }
            return Err(err);
        }

        info!(sticker = %sticker.id, path = %blob_path, "Saved sticker");

        Ok(sticker)
    }
}
