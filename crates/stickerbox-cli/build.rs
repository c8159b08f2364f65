//! Embeds the release version as `STICKERBOX_VERSION`.
//!
//! Uses `git describe` when building from a checkout and falls back to the
//! package version for source tarballs.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=STICKERBOX_VERSION");

    let version = std::env::var("STICKERBOX_VERSION")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=STICKERBOX_VERSION={}", version);
}

/// `git describe` output without a leading `v`, marked when the tree is dirty.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=+dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    let described = described.strip_prefix('v').unwrap_or(described);

    (!described.is_empty()).then(|| described.to_string())
}
