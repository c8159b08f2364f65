//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::collection::CollectionCommand;
use crate::commands::sticker::{delete, list, rename, save, search};

/// Save emotes as stickers and export sticker packs.
#[derive(Parser, Debug)]
#[command(name = "stickerbox")]
#[command(author, version = env!("STICKERBOX_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Library directory (defaults to the platform data directory)
    #[arg(long, env = "STICKERBOX_LIBRARY", global = true)]
    pub library: Option<PathBuf>,

    /// Base URL of the emote service
    #[arg(long, env = "STICKERBOX_API", global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the emote service
    Search(search::SearchArgs),

    /// Save an emote as a sticker
    Save(save::SaveArgs),

    /// List saved stickers
    List(list::ListArgs),

    /// Rename a sticker
    Rename(rename::RenameArgs),

    /// Delete a sticker from the library and all its collections
    Delete(delete::DeleteArgs),

    /// Collection operations
    Collection(CollectionCommand),
}
