//! Error types for stickerbox.
//!
//! Every store, client and workflow returns [`Error`]. The `Display` output is
//! the diagnostic string meant for logs; [`Error::user_message`] is the short
//! text a front end shows to the user.

use thiserror::Error;

use crate::types::Membership;
use crate::usecase::DeleteStickerError;

/// The unified error type for stickerbox operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Local storage failures (I/O, serialization, locking).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Failures talking to the remote emote service.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Paginated fetch errors.
    #[error("pagination error: {0}")]
    Pagination(#[from] PaginationError),

    /// The sticker deletion workflow failed part-way.
    #[error("delete failed: {0}")]
    Delete(#[from] DeleteStickerError),
}

impl Error {
    /// A short message suitable for showing to the user.
    ///
    /// Unlike `Display`, this never includes file paths or server payloads.
    pub fn user_message(&self) -> String {
        match self {
            Error::Storage(_) => "Could not access the sticker library".to_string(),
            Error::NotFound(err) => err.to_string(),
            Error::Remote(RemoteError::Transport { .. }) => {
                "Could not reach the emote service".to_string()
            }
            Error::Remote(_) => "The emote service returned an error".to_string(),
            Error::InvalidInput(err) => err.to_string(),
            Error::Pagination(err) => err.to_string(),
            Error::Delete(err) => err.user_message(),
        }
    }

    /// Whether this error means the requested entity is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Local storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// A record could not be encoded or decoded.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// The library lock could not be taken or released.
    #[error("lock error: {message}")]
    Lock { message: String },

    /// A collection update failed part-way and could not be fully undone.
    /// `unrestored` lists the memberships that are still removed.
    #[error("collection update failed ({message}); {} collection(s) left modified", .unrestored.len())]
    Incomplete {
        message: String,
        unrestored: Vec<Membership>,
    },
}

/// Missing entities.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// No sticker with this id.
    #[error("sticker {id} not found")]
    Sticker { id: String },

    /// No collection with this id.
    #[error("collection {id} not found")]
    Collection { id: String },

    /// The remote service has no emote with this id.
    #[error("emote {id} not found")]
    Emote { id: String },
}

/// Remote emote service errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("transport failed: {message}")]
    Transport { message: String },

    /// The service answered with a non-success status.
    #[error("HTTP {status}{}", status_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// The response body did not match the expected shape.
    #[error("could not decode response: {message}")]
    Decode { message: String },
}

fn status_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid sticker id.
    #[error("invalid sticker id '{value}': {reason}")]
    StickerId { value: String, reason: String },

    /// Invalid collection id.
    #[error("invalid collection id '{value}': {reason}")]
    CollectionId { value: String, reason: String },

    /// Invalid emote id.
    #[error("invalid emote id '{value}': {reason}")]
    EmoteId { value: String, reason: String },

    /// Invalid display name.
    #[error("invalid name '{value}': {reason}")]
    Name { value: String, reason: String },

    /// The emote has already been saved as a sticker.
    #[error("emote {emote_id} is already saved as sticker {sticker_id}")]
    AlreadySaved {
        emote_id: String,
        sticker_id: String,
    },

    /// The emote image download returned no bytes.
    #[error("emote {emote_id} image is empty")]
    EmptyDownload { emote_id: String },

    /// A sticker of the wrong kind was used with a collection.
    #[error("sticker {sticker_id} is {sticker_kind} but collection {collection_id} holds {collection_kind} stickers")]
    KindMismatch {
        sticker_id: String,
        sticker_kind: String,
        collection_id: String,
        collection_kind: String,
    },

    /// The collection cannot be exported as a pack.
    #[error("cannot export collection: {reason}")]
    Export { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Paginated fetch errors.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// The page source reported success but returned no item list.
    #[error("Items undefined")]
    ItemsUndefined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_undefined_message() {
        let err = Error::from(PaginationError::ItemsUndefined);
        assert_eq!(err.user_message(), "Items undefined");
    }

    #[test]
    fn storage_user_message_hides_path() {
        let err = Error::from(StorageError::Io {
            path: "/secret/library/db".to_string(),
            message: "permission denied".to_string(),
        });
        assert!(err.to_string().contains("/secret/library/db"));
        assert!(!err.user_message().contains("/secret"));
    }

    #[test]
    fn status_display() {
        let err = RemoteError::Status {
            status: 503,
            message: Some("maintenance".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 503: maintenance");

        let err = RemoteError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn not_found_detection() {
        let err = Error::from(NotFoundError::Sticker {
            id: "abc".to_string(),
        });
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "sticker abc not found");
    }
}
