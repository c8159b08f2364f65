//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use stickerbox_core::{Collection, Emote, Sticker};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn emote_line(emote: &Emote) {
    let owner = emote.owner.as_deref().unwrap_or("unknown");
    let kind = if emote.animated { " animated" } else { "" };
    println!(
        "{}  {}  {}{}",
        emote.id.as_str().dimmed(),
        emote.name.bold(),
        format!("by {}", owner).dimmed(),
        kind.cyan()
    );
}

pub fn sticker_line(sticker: &Sticker) {
    println!(
        "{}  {}  {}",
        sticker.id.as_str().dimmed(),
        sticker.name.bold(),
        format!("({})", sticker.emote.name).dimmed()
    );
}

pub fn collection_line(collection: &Collection) {
    println!(
        "{}  {}  {}  {}",
        collection.id.as_str().dimmed(),
        collection.name.bold(),
        collection.kind.to_string().cyan(),
        format!("{} stickers", collection.stickers.len()).dimmed()
    );
}

/// Print a failed command.
///
/// Library errors are shown with their short user message; the full error
/// chain is logged at debug level.
pub fn report(err: &anyhow::Error) {
    tracing::debug!(error = ?err, "Command failed");

    match err.downcast_ref::<stickerbox_core::Error>() {
        Some(inner) if inner.to_string() != err.to_string() => {
            error(&format!("{}: {}", err, inner.user_message()));
        }
        Some(inner) => error(&inner.user_message()),
        None => error(&format!("{:#}", err)),
    }
}
