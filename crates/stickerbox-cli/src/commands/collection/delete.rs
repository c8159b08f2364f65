//! Delete collection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::CollectionId;

use crate::commands::confirm;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Collection id
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn run(config: &Config, args: DeleteArgs) -> Result<()> {
    let id = CollectionId::new(args.id.as_str()).context("Invalid collection id")?;
    let library = config.open_library();

    let collection = library
        .collections()
        .require(&id)
        .context("Failed to find collection")?;

    if !args.force
        && !confirm(&format!(
            "This will delete collection '{}' ({} stickers stay in the library). Continue?",
            collection.name,
            collection.stickers.len()
        ))?
    {
        eprintln!("Aborted.");
        return Ok(());
    }

    library
        .collections()
        .delete(&id)
        .context("Failed to delete collection")?;

    output::success(&format!("Collection {} deleted", id));

    Ok(())
}
