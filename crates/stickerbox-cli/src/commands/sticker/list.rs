//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use stickerbox_core::{StickerKind, StickerStore};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List animated stickers instead of static ones
    #[arg(long)]
    pub animated: bool,

    /// Maximum number of stickers to return
    #[arg(long)]
    pub limit: Option<u32>,

    /// Pagination cursor
    #[arg(long)]
    pub cursor: Option<String>,

    /// Print stickers as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &Config, args: ListArgs) -> Result<()> {
    let library = config.open_library();
    let kind = StickerKind::from_animated(args.animated);

    let page = library
        .stickers()
        .list(kind, args.limit, args.cursor.as_deref())
        .await
        .context("Failed to list stickers")?;

    if page.stickers.is_empty() {
        eprintln!("{}", format!("No {} stickers found.", kind).dimmed());
        return Ok(());
    }

    for sticker in &page.stickers {
        if args.json {
            output::json(sticker)?;
        } else {
            output::sticker_line(sticker);
        }
    }

    if let Some(cursor) = &page.cursor {
        eprintln!();
        eprintln!("{}: {}", "Next cursor".dimmed(), cursor);
    }

    Ok(())
}
