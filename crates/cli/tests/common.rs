// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Nothing listens here, so every request fails to connect.
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9/query";
pub const UNREACHABLE_LOGOUT: &str = "http://127.0.0.1:9/api/logout";

/// A `dotask` command isolated in `temp`: its own config file and state
/// directory, an unreachable server, and no color.
pub fn dotask(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("dotask");
    cmd.env("DOTASK_CONFIG", temp.path().join("config.toml"))
        .env("DOTASK_STATE_DIR", temp.path().join("state"))
        .env("DOTASK_ENDPOINT", UNREACHABLE_ENDPOINT)
        .env("DOTASK_LOGOUT_URL", UNREACHABLE_LOGOUT)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("COLOR");
    cmd
}

/// Write the client-side session file the way the CLI stores it.
pub fn write_session(temp: &TempDir, entries: &[(&str, &str)]) {
    let dir = temp.path().join("state");
    std::fs::create_dir_all(&dir).unwrap();
    let map: std::collections::BTreeMap<&str, &str> = entries.iter().copied().collect();
    std::fs::write(dir.join("session.json"), serde_json::to_string(&map).unwrap()).unwrap();
}

pub fn read_session(temp: &TempDir) -> serde_json::Value {
    let text = std::fs::read_to_string(temp.path().join("state").join("session.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}
