//! Add sticker to collection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::{CollectionId, StickerId};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Collection id
    pub collection: String,

    /// Sticker id
    pub sticker: String,
}

pub async fn run(config: &Config, args: AddArgs) -> Result<()> {
    let collection = CollectionId::new(args.collection.as_str()).context("Invalid collection id")?;
    let sticker = StickerId::new(args.sticker.as_str()).context("Invalid sticker id")?;

    config
        .open_library()
        .add_to_collection(&collection, &sticker)
        .await
        .context("Failed to add sticker to collection")?;

    output::success(&format!("Added sticker {} to collection {}", sticker, collection));

    Ok(())
}
