//! Remote emote source trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{Emote, EmoteId};

/// A service that publishes emotes.
#[async_trait]
pub trait EmoteSource: Send + Sync {
    /// Search emotes by name.
    ///
    /// `Ok(None)` means the service answered without an item list, which is
    /// distinct from an empty result.
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Option<Vec<Emote>>>;

    /// Look up a single emote.
    async fn get(&self, id: &EmoteId) -> Result<Emote>;

    /// Download the image bytes for an emote.
    async fn download(&self, emote: &Emote) -> Result<Vec<u8>>;
}
