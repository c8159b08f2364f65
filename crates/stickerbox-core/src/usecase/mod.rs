//! Multi-store workflows over the store traits.

mod delete_sticker;
mod save_sticker;

#[cfg(test)]
pub(crate) mod testing;

pub use delete_sticker::{Compensation, DeleteSticker, DeleteStickerError};
pub use save_sticker::SaveSticker;
