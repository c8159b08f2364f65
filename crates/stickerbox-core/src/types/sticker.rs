//! Sticker record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

use super::{Emote, EmoteId, StickerId};

/// Longest allowed sticker or collection name, in characters.
pub(crate) const MAX_NAME_LEN: usize = 100;

/// Storage partition of a sticker.
///
/// Static and animated stickers are stored and collected separately, since
/// messaging apps do not allow mixing them in one pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerKind {
    Static,
    Animated,
}

impl StickerKind {
    /// Both partitions, static first.
    pub const ALL: [StickerKind; 2] = [StickerKind::Static, StickerKind::Animated];

    pub fn from_animated(animated: bool) -> Self {
        if animated {
            StickerKind::Animated
        } else {
            StickerKind::Static
        }
    }

    pub fn is_animated(self) -> bool {
        self == StickerKind::Animated
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StickerKind::Static => "static",
            StickerKind::Animated => "animated",
        }
    }
}

impl fmt::Display for StickerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StickerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(StickerKind::Static),
            "animated" => Ok(StickerKind::Animated),
            other => Err(InvalidInputError::Other {
                message: format!("unknown sticker kind '{}'", other),
            }
            .into()),
        }
    }
}

/// Image metadata captured when the sticker was saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

/// The remote emote a sticker was saved from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmoteRef {
    pub id: EmoteId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl From<&Emote> for EmoteRef {
    fn from(emote: &Emote) -> Self {
        Self {
            id: emote.id.clone(),
            name: emote.name.clone(),
            owner: emote.owner.clone(),
        }
    }
}

/// A locally saved sticker.
///
/// A sticker owns three pieces of state: this record, the blob at
/// [`Sticker::blob_path`], and zero or more collection memberships.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    pub id: StickerId,
    pub name: String,
    pub animated: bool,
    pub image: ImageMeta,
    pub emote: EmoteRef,
    pub created_at: DateTime<Utc>,
}

impl Sticker {
    /// Build a new sticker record for a saved emote.
    pub fn from_emote(emote: &Emote, name: Option<String>, size_bytes: u64) -> Result<Self, Error> {
        let name = validate_name(name.unwrap_or_else(|| emote.name.clone()))?;

        Ok(Self {
            id: StickerId::generate(),
            name,
            animated: emote.animated,
            image: ImageMeta {
                width: emote.width,
                height: emote.height,
                size_bytes,
            },
            emote: EmoteRef::from(emote),
            created_at: Utc::now(),
        })
    }

    pub fn kind(&self) -> StickerKind {
        StickerKind::from_animated(self.animated)
    }

    /// Relative path of the sticker's image blob.
    ///
    /// Derived from the remote emote id, so it stays stable across renames.
    pub fn blob_path(&self) -> String {
        blob_path_for(&self.emote.id)
    }
}

/// Relative blob path for an emote's image.
pub fn blob_path_for(emote: &EmoteId) -> String {
    format!("stickers/{}.webp", emote)
}

/// Trim and validate a display name.
pub fn validate_name(name: impl Into<String>) -> Result<String, Error> {
    let name = name.into();
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(InvalidInputError::Name {
            value: name.clone(),
            reason: "cannot be empty".to_string(),
        }
        .into());
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(InvalidInputError::Name {
            value: name.clone(),
            reason: format!("exceeds maximum length of {} characters", MAX_NAME_LEN),
        }
        .into());
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emote(animated: bool) -> Emote {
        Emote {
            id: EmoteId::new("60ae958e229664e8667aea38").unwrap(),
            name: "catJAM".to_string(),
            owner: Some("someone".to_string()),
            animated,
            width: 128,
            height: 112,
            image_url: "https://cdn.example/emote/60ae958e229664e8667aea38/4x.webp".to_string(),
        }
    }

    #[test]
    fn blob_path_uses_remote_id() {
        let sticker = Sticker::from_emote(&emote(true), Some("dance".to_string()), 10).unwrap();
        assert_eq!(sticker.blob_path(), "stickers/60ae958e229664e8667aea38.webp");
        assert_eq!(sticker.name, "dance");
    }

    #[test]
    fn name_defaults_to_emote_name() {
        let sticker = Sticker::from_emote(&emote(false), None, 10).unwrap();
        assert_eq!(sticker.name, "catJAM");
        assert_eq!(sticker.kind(), StickerKind::Static);
        assert_eq!(sticker.image.width, 128);
        assert_eq!(sticker.image.size_bytes, 10);
    }

    #[test]
    fn blank_name_rejected() {
        assert!(Sticker::from_emote(&emote(false), Some("   ".to_string()), 10).is_err());
        assert!(validate_name("x".repeat(MAX_NAME_LEN + 1)).is_err());
        assert_eq!(validate_name("  hi  ").unwrap(), "hi");
    }

    #[test]
    fn kind_roundtrip() {
        assert_eq!("animated".parse::<StickerKind>().unwrap(), StickerKind::Animated);
        assert!("gif".parse::<StickerKind>().is_err());
        assert_eq!(
            serde_json::to_string(&StickerKind::Static).unwrap(),
            "\"static\""
        );
    }

    #[test]
    fn record_json_is_lossless() {
        let sticker = Sticker::from_emote(&emote(true), None, 42).unwrap();
        let json = serde_json::to_string(&sticker).unwrap();
        let back: Sticker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sticker);
    }
}
