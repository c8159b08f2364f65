//! Sticker collection type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::sticker::validate_name;
use super::{CollectionId, StickerId, StickerKind};

/// A named, ordered group of stickers of a single kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub kind: StickerKind,
    #[serde(default)]
    pub stickers: Vec<StickerId>,
    pub created_at: DateTime<Utc>,
}

impl Collection {
    /// Create a new, empty collection.
    pub fn new(name: impl Into<String>, kind: StickerKind) -> Result<Self, Error> {
        Ok(Self {
            id: CollectionId::generate(),
            name: validate_name(name)?,
            kind,
            stickers: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn contains(&self, sticker: &StickerId) -> bool {
        self.stickers.contains(sticker)
    }

    /// Append a sticker. Returns false if it was already a member.
    pub fn insert(&mut self, sticker: StickerId) -> bool {
        if self.contains(&sticker) {
            return false;
        }
        self.stickers.push(sticker);
        true
    }

    /// Index of a sticker within the collection.
    pub fn position(&self, sticker: &StickerId) -> Option<usize> {
        self.stickers.iter().position(|s| s == sticker)
    }

    /// Insert a sticker at `position`, or at the end if the collection is
    /// shorter than that. Returns false if it was already a member.
    pub fn insert_at(&mut self, position: usize, sticker: StickerId) -> bool {
        if self.contains(&sticker) {
            return false;
        }
        let position = position.min(self.stickers.len());
        self.stickers.insert(position, sticker);
        true
    }

    /// Remove a sticker. Returns false if it was not a member.
    pub fn remove(&mut self, sticker: &StickerId) -> bool {
        let before = self.stickers.len();
        self.stickers.retain(|s| s != sticker);
        self.stickers.len() != before
    }
}

/// Where a sticker sat in a collection it was removed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Membership {
    pub collection: CollectionId,
    pub position: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut collection = Collection::new("favs", StickerKind::Static).unwrap();
        let id = StickerId::new("s1").unwrap();

        assert!(collection.insert(id.clone()));
        assert!(!collection.insert(id.clone()));
        assert_eq!(collection.stickers.len(), 1);
    }

    #[test]
    fn remove_reports_membership() {
        let mut collection = Collection::new("favs", StickerKind::Animated).unwrap();
        let a = StickerId::new("a").unwrap();
        let b = StickerId::new("b").unwrap();
        collection.insert(a.clone());

        assert!(!collection.remove(&b));
        assert!(collection.remove(&a));
        assert!(collection.stickers.is_empty());
    }

    #[test]
    fn insert_at_restores_order() {
        let mut collection = Collection::new("favs", StickerKind::Static).unwrap();
        let ids: Vec<StickerId> = ["a", "b", "c"]
            .into_iter()
            .map(|s| StickerId::new(s).unwrap())
            .collect();
        for id in &ids {
            collection.insert(id.clone());
        }

        let position = collection.position(&ids[1]).unwrap();
        collection.remove(&ids[1]);
        assert!(collection.insert_at(position, ids[1].clone()));
        assert_eq!(collection.stickers, ids);

        assert!(!collection.insert_at(0, ids[2].clone()));
        assert_eq!(collection.stickers, ids);
    }

    #[test]
    fn insert_at_past_end_appends() {
        let mut collection = Collection::new("favs", StickerKind::Static).unwrap();
        let a = StickerId::new("a").unwrap();

        assert!(collection.insert_at(7, a.clone()));
        assert_eq!(collection.stickers, vec![a]);
    }

    #[test]
    fn blank_name_rejected() {
        assert!(Collection::new(" ", StickerKind::Static).is_err());
    }
}
