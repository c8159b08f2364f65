//! Rename command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::{StickerId, StickerStore};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Sticker id
    pub id: String,

    /// New name
    pub name: String,
}

pub async fn run(config: &Config, args: RenameArgs) -> Result<()> {
    let id = StickerId::new(args.id.as_str()).context("Invalid sticker id")?;
    let library = config.open_library();

    let sticker = library
        .require_sticker(&id)
        .await
        .context("Failed to find sticker")?;

    let renamed = library
        .stickers()
        .rename(sticker.kind(), &id, &args.name)
        .await
        .context("Failed to rename sticker")?;

    output::success(&format!("Renamed sticker {} to '{}'", renamed.id, renamed.name));

    Ok(())
}
