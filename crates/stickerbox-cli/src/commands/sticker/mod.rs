//! Sticker subcommands.

pub mod delete;
pub mod list;
pub mod rename;
pub mod save;
pub mod search;
