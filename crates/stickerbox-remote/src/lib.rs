//! stickerbox-remote - HTTP client for the emote service.

mod client;
mod search;
mod wire;

pub use client::EmoteClient;
pub use search::{EmoteSearch, FIRST_PAGE};
