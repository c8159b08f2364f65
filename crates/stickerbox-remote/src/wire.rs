//! Request and response bodies of the emote service.

use serde::{Deserialize, Serialize};

use stickerbox_core::Result;
use stickerbox_core::error::RemoteError;
use stickerbox_core::types::{Emote, EmoteId};

/// Path of the emote search and lookup endpoints.
pub const EMOTES: &str = "emotes";

/// Query string for a search.
#[derive(Debug, Serialize)]
pub struct SearchQuery<'a> {
    pub query: &'a str,
    pub page: u32,
    pub limit: u32,
}

/// Response from a search.
///
/// `items` is `None` both when the field is missing and when it is `null`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Option<Vec<EmoteDto>>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct EmoteDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub owner: Option<OwnerDto>,
    pub host: HostDto,
}

#[derive(Debug, Deserialize)]
pub struct OwnerDto {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct HostDto {
    pub url: String,
    #[serde(default)]
    pub files: Vec<FileDto>,
}

#[derive(Debug, Deserialize)]
pub struct FileDto {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// Error body of a non-success response.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// The most descriptive text in the body, if any.
    pub fn into_message(self) -> Option<String> {
        match (self.error, self.message) {
            (Some(error), Some(message)) => Some(format!("{}: {}", error, message)),
            (error, message) => message.or(error),
        }
    }
}

impl EmoteDto {
    /// Convert to the domain type, picking the largest WEBP file as the image.
    pub fn into_emote(self) -> Result<Emote> {
        let id = EmoteId::new(self.id).map_err(|e| RemoteError::Decode {
            message: e.to_string(),
        })?;

        let file = self
            .host
            .files
            .iter()
            .filter(|f| f.format.eq_ignore_ascii_case("webp"))
            .max_by_key(|f| u64::from(f.width) * u64::from(f.height))
            .ok_or_else(|| RemoteError::Decode {
                message: format!("emote {} has no WEBP image", id),
            })?;

        let base = if self.host.url.starts_with("//") {
            format!("https:{}", self.host.url)
        } else {
            self.host.url.clone()
        };

        Ok(Emote {
            name: self.name,
            owner: self.owner.map(|o| o.username),
            animated: self.animated,
            width: file.width,
            height: file.height,
            image_url: format!("{}/{}", base.trim_end_matches('/'), file.name),
            id,
        })
    }
}
