//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::StickerId;

use crate::commands::confirm;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Sticker id
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn run(config: &Config, args: DeleteArgs) -> Result<()> {
    let id = StickerId::new(args.id.as_str()).context("Invalid sticker id")?;
    let library = config.open_library();

    let sticker = library
        .require_sticker(&id)
        .await
        .context("Failed to find sticker")?;

    if !args.force
        && !confirm(&format!(
            "This will delete sticker '{}' and remove it from every collection. Continue?",
            sticker.name
        ))?
    {
        eprintln!("Aborted.");
        return Ok(());
    }

    library
        .delete_sticker(&sticker)
        .await
        .context("Failed to delete sticker")?;

    output::success(&format!("Sticker {} deleted", sticker.id));

    Ok(())
}
