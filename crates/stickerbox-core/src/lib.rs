//! stickerbox-core - Core types, traits and workflows for saving emotes as stickers.

pub mod error;
pub mod paginate;
pub mod traits;
pub mod types;
pub mod usecase;

pub use error::Error;
pub use paginate::{LoadStatus, PageEvents, PageSource, Paginator};
pub use traits::{BlobStore, EmoteSource, MembershipStore, StickerPage, StickerStore};
pub use types::{
    Collection, CollectionId, Emote, EmoteId, EmoteRef, ImageMeta, Membership, Sticker,
    StickerId, StickerKind,
};
pub use usecase::{Compensation, DeleteSticker, DeleteStickerError, SaveSticker};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
