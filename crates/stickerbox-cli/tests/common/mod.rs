#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

/// Run the CLI against `library`, optionally pointed at an emote service.
pub fn run_cli(args: &[&str], library: &Path, api: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stickerbox"));
    cmd.args(args);
    cmd.env("STICKERBOX_LIBRARY", library);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    match api {
        Some(api) => cmd.env("STICKERBOX_API", api),
        None => cmd.env_remove("STICKERBOX_API"),
    };
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], library: &Path, api: Option<&str>) -> String {
    let output = run_cli(args, library, api);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Parse JSON-lines output.
pub fn json_lines(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("invalid JSON line"))
        .collect()
}

/// Create a collection and return its id.
pub fn create_collection(library: &Path, name: &str, animated: bool) -> String {
    let mut args = vec!["collection", "create", name];
    if animated {
        args.push("--animated");
    }
    run_cli_success(&args, library, None);

    json_lines(&run_cli_success(&["collection", "list", "--json"], library, None))
        .into_iter()
        .find(|c| c["name"] == name)
        .and_then(|c| c["id"].as_str().map(str::to_string))
        .expect("collection not listed")
}
