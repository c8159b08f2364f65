//! Remove sticker from collection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::{CollectionId, StickerId};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Collection id
    pub collection: String,

    /// Sticker id
    pub sticker: String,
}

pub async fn run(config: &Config, args: RemoveArgs) -> Result<()> {
    let collection = CollectionId::new(args.collection.as_str()).context("Invalid collection id")?;
    let sticker = StickerId::new(args.sticker.as_str()).context("Invalid sticker id")?;

    let removed = config
        .open_library()
        .collections()
        .remove_member_from(&collection, &sticker)
        .context("Failed to remove sticker from collection")?;

    if removed {
        output::success(&format!("Removed sticker {} from collection {}", sticker, collection));
    } else {
        output::warning(&format!("Sticker {} is not in collection {}", sticker, collection));
    }

    Ok(())
}
