//! Emote search as a page source.

use async_trait::async_trait;

use stickerbox_core::paginate::{PageEvents, PageSource, Paginator};
use stickerbox_core::traits::EmoteSource;
use stickerbox_core::types::Emote;
use stickerbox_core::Result;

use crate::client::EmoteClient;

/// Page number of the first search page.
pub const FIRST_PAGE: u32 = 1;

/// A search query walked page by page.
#[derive(Debug, Clone)]
pub struct EmoteSearch<C = EmoteClient> {
    client: C,
    query: String,
    limit: u32,
}

impl<C: EmoteSource> EmoteSearch<C> {
    pub fn new(client: C, query: impl Into<String>, limit: u32) -> Self {
        Self {
            client,
            query: query.into(),
            limit,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// A paginator over this search, starting at the first page.
    pub fn paginate<E>(self, events: E) -> Paginator<Self, E>
    where
        E: PageEvents<u32, Emote>,
    {
        Paginator::new(self, FIRST_PAGE, events)
    }
}

#[async_trait]
impl<C: EmoteSource> PageSource for EmoteSearch<C> {
    type Key = u32;
    type Item = Emote;

    async fn fetch(&self, page: &u32) -> Result<Option<Vec<Emote>>> {
        self.client.search(&self.query, *page, self.limit).await
    }

    fn next_key(&self, page: &u32, _items: &[Emote]) -> u32 {
        page + 1
    }
}
