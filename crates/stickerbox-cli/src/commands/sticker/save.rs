//! Save command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::{EmoteId, EmoteSource};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Id of the emote to save
    pub emote_id: String,

    /// Sticker name (defaults to the emote name)
    #[arg(long)]
    pub name: Option<String>,

    /// Print the saved sticker as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &Config, args: SaveArgs) -> Result<()> {
    let emote_id = EmoteId::new(args.emote_id.as_str()).context("Invalid emote id")?;
    let client = config.client()?;
    let library = config.open_library();

    let emote = client
        .get(&emote_id)
        .await
        .context("Failed to look up emote")?;

    let sticker = library
        .save_sticker(client, &emote, args.name)
        .await
        .context("Failed to save sticker")?;

    if args.json {
        return output::json(&sticker);
    }

    output::success("Sticker saved");
    output::field("ID", sticker.id.as_str());
    output::field("Name", &sticker.name);
    output::field("Kind", sticker.kind().as_str());
    output::field(
        "Size",
        &format!(
            "{}x{}, {} bytes",
            sticker.image.width, sticker.image.height, sticker.image.size_bytes
        ),
    );

    Ok(())
}
