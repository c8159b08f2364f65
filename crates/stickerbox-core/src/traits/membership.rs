//! Collection membership trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{CollectionId, Membership, StickerId, StickerKind};

/// Tracks which collections a sticker belongs to.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Remove a sticker from every collection of the given kind.
    ///
    /// Returns each collection it was removed from together with the
    /// sticker's former position there. A sticker with no memberships yields
    /// an empty list.
    ///
    /// On failure the store puts back what it already changed. If that is
    /// not possible the error is [`StorageError::Incomplete`] naming the
    /// memberships still removed; any other error means nothing changed.
    ///
    /// [`StorageError::Incomplete`]: crate::error::StorageError::Incomplete
    async fn remove_member(
        &self,
        kind: StickerKind,
        sticker: &StickerId,
    ) -> Result<Vec<Membership>>;

    /// Add a sticker to a collection. Adding an existing member is a no-op.
    async fn add_member(&self, collection: &CollectionId, sticker: &StickerId) -> Result<()>;

    /// Put a sticker back at the position it was removed from.
    ///
    /// Appends if the collection has since shrunk below that position, and
    /// does nothing if the sticker is already a member.
    async fn restore_member(&self, membership: &Membership, sticker: &StickerId) -> Result<()>;
}
