//! Create collection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::StickerKind;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Collection name
    pub name: String,

    /// Hold animated stickers instead of static ones
    #[arg(long)]
    pub animated: bool,
}

pub async fn run(config: &Config, args: CreateArgs) -> Result<()> {
    let library = config.open_library();

    let collection = library
        .collections()
        .create(&args.name, StickerKind::from_animated(args.animated))
        .context("Failed to create collection")?;

    output::success(&format!("Created collection '{}'", collection.name));
    output::field("ID", collection.id.as_str());
    output::field("Kind", collection.kind.as_str());

    Ok(())
}
