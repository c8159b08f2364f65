//! stickerbox - save emotes as stickers and export them as sticker packs.
//!
//! A thin wrapper over the stickerbox crates: emote search and download go
//! through the remote client, everything else works on a local library
//! directory.

mod cli;
mod commands;
mod config;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{collection, sticker};
use config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(&cli)?;

    match cli.command {
        Commands::Search(args) => sticker::search::run(&config, args).await,
        Commands::Save(args) => sticker::save::run(&config, args).await,
        Commands::List(args) => sticker::list::run(&config, args).await,
        Commands::Rename(args) => sticker::rename::run(&config, args).await,
        Commands::Delete(args) => sticker::delete::run(&config, args).await,
        Commands::Collection(cmd) => collection::handle(&config, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so command output on stdout stays parseable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
