//! Search command implementation.

use std::sync::Mutex;

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;

use stickerbox_core::{Emote, Error, LoadStatus, PageEvents};
use stickerbox_remote::EmoteSearch;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to search for
    pub query: String,

    /// Emotes per page
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Print emotes as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Prints each page as it arrives and keeps the last error.
struct Printer {
    json: bool,
    error: Mutex<Option<Error>>,
}

impl PageEvents<u32, Emote> for Printer {
    fn on_success(&self, items: Vec<Emote>, _next_key: &u32) {
        for emote in &items {
            if self.json {
                if let Err(err) = output::json(emote) {
                    tracing::warn!(error = %err, "Could not print emote");
                }
            } else {
                output::emote_line(emote);
            }
        }
    }

    fn on_error(&self, error: Error) {
        if let Ok(mut slot) = self.error.lock() {
            *slot = Some(error);
        }
    }
}

pub async fn run(config: &Config, args: SearchArgs) -> Result<()> {
    let client = config.client()?;
    let printer = Printer {
        json: args.json,
        error: Mutex::new(None),
    };
    let paginator = EmoteSearch::new(client, &args.query, args.limit).paginate(printer);

    let mut found = 0;
    for _ in 0..args.pages {
        match paginator.load_next_items().await {
            LoadStatus::Loaded { count: 0 } => break,
            LoadStatus::Loaded { count } => found += count,
            LoadStatus::Failed => {
                let error = paginator
                    .events()
                    .error
                    .lock()
                    .ok()
                    .and_then(|mut slot| slot.take());
                return Err(match error {
                    Some(error) => anyhow::Error::new(error).context("Search failed"),
                    None => anyhow!("Search failed"),
                });
            }
            LoadStatus::Busy | LoadStatus::Stale => break,
        }
    }

    if found == 0 {
        eprintln!("{}", "No emotes found.".dimmed());
    } else {
        eprintln!();
        eprintln!("{}: {}", "Next page".dimmed(), paginator.current_key());
    }

    Ok(())
}
