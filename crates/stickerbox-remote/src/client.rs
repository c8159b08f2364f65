//! HTTP client for the emote service.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace, warn};

use stickerbox_core::error::{Error, InvalidInputError, NotFoundError, RemoteError};
use stickerbox_core::traits::EmoteSource;
use stickerbox_core::types::{Emote, EmoteId};
use stickerbox_core::Result;

use crate::wire::{EMOTES, EmoteDto, ErrorResponse, SearchQuery, SearchResponse};

/// Client for the emote search, lookup and image endpoints.
#[derive(Debug, Clone)]
pub struct EmoteClient {
    client: reqwest::Client,
    base: String,
}

impl EmoteClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base = base_url.into().trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(InvalidInputError::Other {
                message: format!("API URL '{}' must start with http:// or https://", base),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("stickerbox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self { client, base })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// GET a JSON document.
    async fn get_json<Q, R>(&self, url: &str, params: Option<&Q>) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        trace!(?params, "query parameters");

        let mut request = self.client.get(url);
        if let Some(params) = params {
            request = request.query(params);
        }
        let response = request.send().await.map_err(map_reqwest)?;

        let response = check_status(response).await?;
        response.json::<R>().await.map_err(map_reqwest)
    }
}

#[async_trait]
impl EmoteSource for EmoteClient {
    #[instrument(skip(self), fields(base = %self.base))]
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Option<Vec<Emote>>> {
        debug!("Searching emotes");

        let params = SearchQuery { query, page, limit };
        let response: SearchResponse = self.get_json(&self.url(EMOTES), Some(&params)).await?;

        debug!(page = ?response.page, total = ?response.total, "Search page received");

        let Some(items) = response.items else {
            return Ok(None);
        };

        let mut emotes = Vec::with_capacity(items.len());
        for dto in items {
            let id = dto.id.clone();
            match dto.into_emote() {
                Ok(emote) => emotes.push(emote),
                Err(err) => warn!(id = %id, error = %err, "Skipping unusable emote"),
            }
        }

        Ok(Some(emotes))
    }

    #[instrument(skip(self), fields(base = %self.base))]
    async fn get(&self, id: &EmoteId) -> Result<Emote> {
        debug!("Fetching emote");

        let url = self.url(&format!("{}/{}", EMOTES, id));
        match self.get_json::<(), EmoteDto>(&url, None).await {
            Ok(dto) => dto.into_emote(),
            Err(Error::Remote(RemoteError::Status { status: 404, .. })) => {
                Err(NotFoundError::Emote { id: id.to_string() }.into())
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self, emote), fields(id = %emote.id, url = %emote.image_url))]
    async fn download(&self, emote: &Emote) -> Result<Vec<u8>> {
        debug!("Downloading emote image");

        let response = self
            .client
            .get(&emote.image_url)
            .send()
            .await
            .map_err(map_reqwest)?;

        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(map_reqwest)?;

        debug!(size = bytes.len(), "Downloaded emote image");

        Ok(bytes.to_vec())
    }
}

/// Pass a success response through, or turn the error body into an error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    trace!(status = %status, "HTTP response");

    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.into_message(),
        Err(_) => None,
    };

    Err(RemoteError::Status {
        status: status.as_u16(),
        message,
    }
    .into())
}

fn map_reqwest(err: reqwest::Error) -> Error {
    if err.is_decode() {
        RemoteError::Decode {
            message: err.to_string(),
        }
        .into()
    } else {
        RemoteError::Transport {
            message: err.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = EmoteClient::new("https://api.example.com/v1/").unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/v1");
        assert_eq!(client.url(EMOTES), "https://api.example.com/v1/emotes");
    }

    #[test]
    fn rejects_non_http_url() {
        let err = EmoteClient::new("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }
}
