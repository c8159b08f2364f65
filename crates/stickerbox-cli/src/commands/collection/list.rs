//! List collections command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print collections as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &Config, args: ListArgs) -> Result<()> {
    let library = config.open_library();

    let collections = library
        .collections()
        .list()
        .context("Failed to list collections")?;

    if collections.is_empty() {
        eprintln!("{}", "No collections found.".dimmed());
        return Ok(());
    }

    for collection in &collections {
        if args.json {
            output::json(collection)?;
        } else {
            output::collection_line(collection);
        }
    }

    Ok(())
}
