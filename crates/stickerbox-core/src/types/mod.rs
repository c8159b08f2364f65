//! Core stickerbox types.
//!
//! Identifiers enforce their format at construction time, so a store never
//! sees an id that would be unsafe to use as a path segment.

mod collection;
mod emote;
mod ids;
mod sticker;

pub use collection::{Collection, Membership};
pub use emote::Emote;
pub use ids::{CollectionId, EmoteId, StickerId};
pub use sticker::{EmoteRef, ImageMeta, Sticker, StickerKind, blob_path_for, validate_name};
