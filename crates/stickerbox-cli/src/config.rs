//! Resolution of the library directory and the emote service URL.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use stickerbox_file::FileLibrary;
use stickerbox_remote::EmoteClient;

use crate::cli::Cli;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub library: PathBuf,
    pub api: Option<String>,
}

impl Config {
    /// Take `--library` and `--api` (or their environment variables), falling
    /// back to the platform data directory for the library.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let library = match &cli.library {
            Some(path) => path.clone(),
            None => default_library_dir()?,
        };

        debug!(library = %library.display(), api = ?cli.api, "Resolved configuration");

        Ok(Self {
            library,
            api: cli.api.clone(),
        })
    }

    pub fn open_library(&self) -> FileLibrary {
        FileLibrary::open(&self.library)
    }

    /// Client for the configured emote service.
    pub fn client(&self) -> Result<EmoteClient> {
        let api = self
            .api
            .as_deref()
            .context("No emote service configured. Pass --api or set STICKERBOX_API.")?;

        EmoteClient::new(api).context("Invalid emote service URL")
    }
}

fn default_library_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "stickerbox").context("Could not determine data directory")?;

    Ok(dirs.data_dir().to_path_buf())
}
