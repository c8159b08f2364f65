//! Remote emote type.

use serde::{Deserialize, Serialize};

use super::{EmoteId, StickerKind};

/// An emote published by the remote service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    pub id: EmoteId,
    pub name: String,
    pub owner: Option<String>,
    pub animated: bool,
    pub width: u32,
    pub height: u32,
    /// Absolute URL of the image that gets saved as the sticker blob.
    pub image_url: String,
}

impl Emote {
    pub fn kind(&self) -> StickerKind {
        StickerKind::from_animated(self.animated)
    }
}
