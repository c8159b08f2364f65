//! Validated identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::{Error, InvalidInputError};

const MAX_ID_LEN: usize = 64;

/// Checks the shared identifier format: 1-64 chars of `[A-Za-z0-9_-]`.
fn check_id(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("cannot be empty".to_string());
    }

    if s.len() > MAX_ID_LEN {
        return Err(format!(
            "exceeds maximum length of {} characters",
            MAX_ID_LEN
        ));
    }

    if let Some(c) = s
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(format!("contains invalid character '{}'", c));
    }

    Ok(())
}

/// Generates a fresh id in UUID v4 simple form.
fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Identifier of a locally saved sticker.
///
/// # Example
///
/// ```
/// use stickerbox_core::StickerId;
///
/// let id = StickerId::new("3f2a9c").unwrap();
/// assert_eq!(id.as_str(), "3f2a9c");
/// assert!(StickerId::new("../etc").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StickerId(String);

impl StickerId {
    /// Create a sticker id from a string, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        check_id(&s).map_err(|reason| InvalidInputError::StickerId {
            value: s.clone(),
            reason,
        })?;
        Ok(Self(s))
    }

    /// Generate a new random sticker id.
    pub fn generate() -> Self {
        Self(generate_id())
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a local collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionId(String);

impl CollectionId {
    /// Create a collection id from a string, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        check_id(&s).map_err(|reason| InvalidInputError::CollectionId {
            value: s.clone(),
            reason,
        })?;
        Ok(Self(s))
    }

    /// Generate a new random collection id.
    pub fn generate() -> Self {
        Self(generate_id())
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier assigned to an emote by the remote service.
///
/// This is the stable remote id; blob paths are derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmoteId(String);

impl EmoteId {
    /// Create an emote id from a string, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        check_id(&s).map_err(|reason| InvalidInputError::EmoteId {
            value: s.clone(),
            reason,
        })?;
        Ok(Self(s))
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_id_conversions {
    ($($ty:ident),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::new(s)
                }
            }

            impl TryFrom<String> for $ty {
                type Error = Error;

                fn try_from(s: String) -> Result<Self, Self::Error> {
                    Self::new(s)
                }
            }

            impl From<$ty> for String {
                fn from(id: $ty) -> Self {
                    id.0
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )*
    };
}

impl_id_conversions!(StickerId, CollectionId, EmoteId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids() {
        assert_eq!(StickerId::new("abc_123-X").unwrap().as_str(), "abc_123-X");
        assert_eq!(EmoteId::new("60ae958e229664e8667aea38").unwrap().as_str(), "60ae958e229664e8667aea38");
    }

    #[test]
    fn invalid_empty() {
        assert!(StickerId::new("").is_err());
        assert!(CollectionId::new("").is_err());
    }

    #[test]
    fn invalid_path_characters() {
        assert!(EmoteId::new("../../etc/passwd").is_err());
        assert!(StickerId::new("a/b").is_err());
        assert!(CollectionId::new("a.b").is_err());
    }

    #[test]
    fn invalid_too_long() {
        let long = "a".repeat(MAX_ID_LEN + 1);
        assert!(StickerId::new(long).is_err());
        assert!(StickerId::new("a".repeat(MAX_ID_LEN)).is_ok());
    }

    #[test]
    fn generated_ids_are_valid_and_distinct() {
        let a = StickerId::generate();
        let b = StickerId::generate();
        assert_ne!(a, b);
        assert!(StickerId::new(a.as_str()).is_ok());
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn serde_rejects_invalid() {
        let ok: Result<EmoteId, _> = serde_json::from_str("\"abc\"");
        assert!(ok.is_ok());
        let bad: Result<EmoteId, _> = serde_json::from_str("\"a b\"");
        assert!(bad.is_err());
    }
}
