//! Rename collection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::CollectionId;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Collection id
    pub id: String,

    /// New name
    pub name: String,
}

pub async fn run(config: &Config, args: RenameArgs) -> Result<()> {
    let id = CollectionId::new(args.id.as_str()).context("Invalid collection id")?;

    let collection = config
        .open_library()
        .collections()
        .rename(&id, &args.name)
        .context("Failed to rename collection")?;

    output::success(&format!("Renamed collection {} to '{}'", collection.id, collection.name));

    Ok(())
}
