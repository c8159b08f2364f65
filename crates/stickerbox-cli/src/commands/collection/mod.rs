//! Collection subcommand implementations.

mod add;
mod create;
mod delete;
mod export;
mod list;
mod remove;
mod rename;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CollectionSubcommand {
    /// Create an empty collection
    Create(create::CreateArgs),

    /// List collections
    List(list::ListArgs),

    /// Rename a collection
    Rename(rename::RenameArgs),

    /// Add a sticker to a collection
    Add(add::AddArgs),

    /// Remove a sticker from a collection
    Remove(remove::RemoveArgs),

    /// Delete a collection (its stickers are kept)
    Delete(delete::DeleteArgs),

    /// Export a collection as a sticker pack
    Export(export::ExportArgs),
}

pub async fn handle(config: &Config, cmd: CollectionCommand) -> Result<()> {
    match cmd.command {
        CollectionSubcommand::Create(args) => create::run(config, args).await,
        CollectionSubcommand::List(args) => list::run(config, args).await,
        CollectionSubcommand::Rename(args) => rename::run(config, args).await,
        CollectionSubcommand::Add(args) => add::run(config, args).await,
        CollectionSubcommand::Remove(args) => remove::run(config, args).await,
        CollectionSubcommand::Delete(args) => delete::run(config, args).await,
        CollectionSubcommand::Export(args) => export::run(config, args).await,
    }
}
