//! Subcommand implementations.

pub mod collection;
pub mod sticker;

use std::io::{self, Write};

use anyhow::Result;

/// Ask a yes/no question on stderr. Anything but `y` declines.
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
