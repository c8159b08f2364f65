//! stickerbox-file - Filesystem-backed sticker library.

mod blobs;
mod collections;
mod export;
mod library;
mod stickers;
mod store;

pub use blobs::FileBlobStore;
pub use collections::FileCollectionStore;
pub use export::{ExportedPack, PACK_MAX_STICKERS, PACK_MIN_STICKERS, PackSticker};
pub use library::FileLibrary;
pub use stickers::FileStickerStore;
pub use store::FileStore;
