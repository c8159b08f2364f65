//! Export collection command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use stickerbox_core::CollectionId;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Collection id
    pub id: String,

    /// Directory to write the pack into
    pub dest: PathBuf,

    /// Print the pack manifest as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &Config, args: ExportArgs) -> Result<()> {
    let id = CollectionId::new(args.id.as_str()).context("Invalid collection id")?;

    let pack = config
        .open_library()
        .export_collection(&id, &args.dest)
        .await
        .context("Failed to export collection")?;

    if args.json {
        return output::json_pretty(&pack);
    }

    output::success(&format!("Exported '{}'", pack.name));
    output::field("Stickers", &pack.stickers.len().to_string());
    output::field("Directory", &pack.dir.display().to_string());

    Ok(())
}
