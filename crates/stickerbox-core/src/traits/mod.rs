//! Store and source traits the workflows are written against.

mod blobs;
mod emotes;
mod membership;
mod stickers;

pub use blobs::BlobStore;
pub use emotes::EmoteSource;
pub use membership::MembershipStore;
pub use stickers::{StickerPage, StickerStore};
