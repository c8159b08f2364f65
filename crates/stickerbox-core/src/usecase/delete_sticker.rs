//! Sticker deletion across membership, record and blob stores.
//!
//! The steps run in a fixed order: collection memberships, then the record,
//! then the image blob. When a step fails, the earlier steps are undone from
//! the [`Sticker`] snapshot the caller passed in, so the sticker ends up
//! either fully present or fully absent. If an undo step fails as well, the
//! error reports [`Compensation::Partial`] with what could not be restored.
//!
//! Memberships are restored at the positions they were removed from, so a
//! compensated collection keeps its original order.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, StorageError};
use crate::traits::{BlobStore, MembershipStore, StickerStore};
use crate::types::{Membership, Sticker, StickerId};

/// How far the undo of earlier steps got after a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Nothing had changed yet, so nothing was undone.
    NotAttempted,
    /// Every earlier step was undone.
    Complete,
    /// Some undo steps failed; each entry describes one.
    Partial { failures: Vec<String> },
}

impl Compensation {
    fn from_failures(failures: Vec<String>) -> Self {
        if failures.is_empty() {
            Compensation::Complete
        } else {
            Compensation::Partial { failures }
        }
    }

    /// Whether the sticker was left exactly as it was before the call.
    pub fn is_consistent(&self) -> bool {
        !matches!(self, Compensation::Partial { .. })
    }
}

impl fmt::Display for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compensation::NotAttempted => f.write_str("nothing to restore"),
            Compensation::Complete => f.write_str("restored"),
            Compensation::Partial { failures } => {
                write!(f, "partially restored: {}", failures.join("; "))
            }
        }
    }
}

/// Failure of the sticker deletion workflow.
#[derive(Debug, Error)]
pub enum DeleteStickerError {
    /// Step 1: removing the sticker from its collections failed.
    #[error("removing sticker {sticker_id} from collections failed ({compensation}): {source}")]
    MembershipRemovalFailed {
        sticker_id: StickerId,
        source: Box<Error>,
        compensation: Compensation,
    },

    /// Step 2: deleting the sticker record failed.
    #[error("deleting sticker {sticker_id} record failed ({compensation}): {source}")]
    RecordDeletionFailed {
        sticker_id: StickerId,
        source: Box<Error>,
        compensation: Compensation,
    },

    /// Step 3: deleting the sticker image blob failed.
    #[error("deleting sticker {sticker_id} image failed ({compensation}): {source}")]
    BlobDeletionFailed {
        sticker_id: StickerId,
        source: Box<Error>,
        compensation: Compensation,
    },
}

impl DeleteStickerError {
    pub fn compensation(&self) -> &Compensation {
        match self {
            DeleteStickerError::MembershipRemovalFailed { compensation, .. }
            | DeleteStickerError::RecordDeletionFailed { compensation, .. }
            | DeleteStickerError::BlobDeletionFailed { compensation, .. } => compensation,
        }
    }

    /// The store error that stopped the workflow.
    pub fn store_error(&self) -> &Error {
        match self {
            DeleteStickerError::MembershipRemovalFailed { source, .. }
            | DeleteStickerError::RecordDeletionFailed { source, .. }
            | DeleteStickerError::BlobDeletionFailed { source, .. } => source,
        }
    }

    pub fn user_message(&self) -> String {
        let base = match self {
            DeleteStickerError::MembershipRemovalFailed { .. } => {
                "Could not remove the sticker from its collections"
            }
            DeleteStickerError::RecordDeletionFailed { .. } => "Could not delete the sticker",
            DeleteStickerError::BlobDeletionFailed { .. } => "Could not delete the sticker image",
        };

        if self.compensation().is_consistent() {
            base.to_string()
        } else {
            format!("{}; the sticker library may need repair", base)
        }
    }
}

/// Deletes a sticker from every store, undoing completed steps on failure.
#[derive(Debug, Clone)]
pub struct DeleteSticker<M, R, B> {
    membership: M,
    records: R,
    blobs: B,
}

impl<M, R, B> DeleteSticker<M, R, B>
where
    M: MembershipStore,
    R: StickerStore,
    B: BlobStore,
{
    pub fn new(membership: M, records: R, blobs: B) -> Self {
        Self {
            membership,
            records,
            blobs,
        }
    }

    /// Delete `sticker`.
    ///
    /// `sticker` must be the stored record; it is what gets re-inserted if
    /// the blob cannot be deleted.
    #[instrument(skip(self, sticker), fields(sticker = %sticker.id, kind = %sticker.kind()))]
    pub async fn execute(&self, sticker: &Sticker) -> Result<(), DeleteStickerError> {
        let kind = sticker.kind();

        let removed_from = match self.membership.remove_member(kind, &sticker.id).await {
            Ok(memberships) => memberships,
            Err(err) => {
                warn!(error = %err, "Failed to remove sticker from collections");
                // The store undoes its own partial work; only what it could
                // not put back is left for us.
                let compensation = match &err {
                    Error::Storage(StorageError::Incomplete { unrestored, .. }) => {
                        let mut failures = Vec::new();
                        self.restore_memberships(&sticker.id, unrestored, &mut failures)
                            .await;
                        Compensation::from_failures(failures)
                    }
                    _ => Compensation::NotAttempted,
                };
                return Err(DeleteStickerError::MembershipRemovalFailed {
                    sticker_id: sticker.id.clone(),
                    source: Box::new(err),
                    compensation,
                });
            }
        };
        debug!(collections = removed_from.len(), "Removed sticker from collections");

        if let Err(err) = self.records.delete(kind, &sticker.id).await {
            warn!(error = %err, "Failed to delete sticker record, restoring memberships");
            let mut failures = Vec::new();
            self.restore_memberships(&sticker.id, &removed_from, &mut failures)
                .await;

            return Err(DeleteStickerError::RecordDeletionFailed {
                sticker_id: sticker.id.clone(),
                source: Box::new(err),
                compensation: Compensation::from_failures(failures),
            });
        }
        debug!("Deleted sticker record");

        let blob_path = sticker.blob_path();
        if let Err(err) = self.blobs.delete(&blob_path).await {
            warn!(error = %err, path = %blob_path, "Failed to delete sticker image, restoring record");
            let mut failures = Vec::new();

            match self.records.insert(sticker).await {
                Ok(()) => {
                    self.restore_memberships(&sticker.id, &removed_from, &mut failures)
                        .await;
                }
                Err(insert_err) => {
                    warn!(error = %insert_err, "Failed to restore sticker record");
                    failures.push(format!("re-insert record: {}", insert_err));
                    // Memberships pointing at a missing record would be dangling.
                    if !removed_from.is_empty() {
                        failures.push(format!(
                            "memberships in {} collection(s) not restored",
                            removed_from.len()
                        ));
                    }
                }
            }

            return Err(DeleteStickerError::BlobDeletionFailed {
                sticker_id: sticker.id.clone(),
                source: Box::new(err),
                compensation: Compensation::from_failures(failures),
            });
        }

        info!(path = %blob_path, "Deleted sticker");

        Ok(())
    }

    async fn restore_memberships(
        &self,
        sticker: &StickerId,
        memberships: &[Membership],
        failures: &mut Vec<String>,
    ) {
        for membership in memberships {
            if let Err(err) = self.membership.restore_member(membership, sticker).await {
                let collection = &membership.collection;
                warn!(%collection, error = %err, "Failed to restore collection membership");
                failures.push(format!("re-add to collection {}: {}", collection, err));
            }
        }
    }
}
