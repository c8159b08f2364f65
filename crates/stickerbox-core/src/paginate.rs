//! Single-flight cursor paginator.
//!
//! A [`Paginator`] walks a [`PageSource`] one page at a time. At most one
//! fetch is in flight per paginator: a call made while another is running
//! returns [`LoadStatus::Busy`] without fetching. The cursor only moves when
//! a fetch returns an item list, and a fetch that started before
//! [`Paginator::reset`] cannot move the cursor when it completes.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::{Error, PaginationError};
use crate::Result;

/// A source of keyed pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Opaque cursor identifying where to resume.
    type Key: Clone + fmt::Debug + Send + Sync;
    /// Page element type.
    type Item: Send;

    /// Fetch the page at `key`.
    ///
    /// `Ok(None)` is a successful response that carried no item list.
    async fn fetch(&self, key: &Self::Key) -> Result<Option<Vec<Self::Item>>>;

    /// Compute the key following `key`, given the items fetched with it.
    fn next_key(&self, key: &Self::Key, items: &[Self::Item]) -> Self::Key;
}

/// Listener for paginator progress. All methods default to no-ops.
pub trait PageEvents<K, T>: Send + Sync {
    /// Called with `true` before a fetch and `false` once it is handled.
    fn on_loading(&self, _loading: bool) {}

    /// Called with a fetched page and the key the paginator advanced to.
    fn on_success(&self, _items: Vec<T>, _next_key: &K) {}

    /// Called with the fetch error, unchanged.
    fn on_error(&self, _error: Error) {}
}

impl<K, T> PageEvents<K, T> for () {}

/// Outcome of a [`Paginator::load_next_items`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A page was fetched and the key advanced.
    Loaded { count: usize },
    /// Another fetch was in flight; nothing was done.
    Busy,
    /// The fetch failed; the error went to [`PageEvents::on_error`].
    Failed,
    /// The fetch completed after a reset and was discarded.
    Stale,
}

#[derive(Debug)]
struct PageCursor<K> {
    key: K,
    /// Bumped on every reset so late completions can be recognised.
    generation: u64,
}

/// Clears the in-flight flag when dropped, including on cancellation.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Fetches pages from a [`PageSource`], one at a time.
pub struct Paginator<S: PageSource, E = ()> {
    source: S,
    events: E,
    initial_key: S::Key,
    cursor: Mutex<PageCursor<S::Key>>,
    in_flight: AtomicBool,
}

impl<S, E> Paginator<S, E>
where
    S: PageSource,
    E: PageEvents<S::Key, S::Item>,
{
    /// Create a paginator starting at `initial_key`.
    pub fn new(source: S, initial_key: S::Key, events: E) -> Self {
        Self {
            source,
            events,
            cursor: Mutex::new(PageCursor {
                key: initial_key.clone(),
                generation: 0,
            }),
            initial_key,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// The key the next fetch will use.
    pub fn current_key(&self) -> S::Key {
        self.lock_cursor().key.clone()
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetch the page at the current key.
    #[instrument(skip(self))]
    pub async fn load_next_items(&self) -> LoadStatus {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Page fetch already in flight, skipping");
            return LoadStatus::Busy;
        }
        let guard = InFlightGuard(&self.in_flight);

        self.events.on_loading(true);

        let (key, generation) = {
            let cursor = self.lock_cursor();
            (cursor.key.clone(), cursor.generation)
        };

        debug!(?key, "Fetching page");
        let result = self.source.fetch(&key).await;

        let status = match result {
            Ok(Some(items)) => self.advance(&key, generation, items),
            Ok(None) => {
                debug!(?key, "Page source returned no item list");
                self.events.on_error(PaginationError::ItemsUndefined.into());
                LoadStatus::Failed
            }
            Err(err) => {
                debug!(?key, error = %err, "Page fetch failed");
                self.events.on_error(err);
                LoadStatus::Failed
            }
        };

        // Released only once the cursor has moved, so the next caller reads the new key.
        drop(guard);

        self.events.on_loading(false);
        status
    }

    /// Move the cursor back to the initial key.
    ///
    /// A fetch already in flight keeps running, but its result is discarded.
    pub fn reset(&self) {
        let mut cursor = self.lock_cursor();
        cursor.key = self.initial_key.clone();
        cursor.generation += 1;
        debug!(key = ?cursor.key, "Paginator reset");
    }

    fn advance(&self, key: &S::Key, generation: u64, items: Vec<S::Item>) -> LoadStatus {
        let next_key = {
            let mut cursor = self.lock_cursor();
            if cursor.generation != generation {
                None
            } else {
                let next_key = self.source.next_key(key, &items);
                cursor.key = next_key.clone();
                Some(next_key)
            }
        };

        match next_key {
            Some(next_key) => {
                let count = items.len();
                debug!(count, ?next_key, "Page loaded");
                self.events.on_success(items, &next_key);
                LoadStatus::Loaded { count }
            }
            None => {
                debug!(?key, "Discarding page fetched before reset");
                LoadStatus::Stale
            }
        }
    }

    fn lock_cursor(&self) -> MutexGuard<'_, PageCursor<S::Key>> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: PageSource, E> fmt::Debug for Paginator<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("initial_key", &self.initial_key)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
