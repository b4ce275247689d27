// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule. Empty values count as unset.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `DOTASK_ENDPOINT` if set.
pub fn endpoint() -> Option<String> {
    non_empty(vars::DOTASK_ENDPOINT)
}

/// Returns the value of `DOTASK_LOGOUT_URL` if set.
pub fn logout_url() -> Option<String> {
    non_empty(vars::DOTASK_LOGOUT_URL)
}

/// Returns the value of `DOTASK_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    non_empty(vars::DOTASK_STATE_DIR).map(PathBuf::from)
}

/// Returns the value of `DOTASK_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    non_empty(vars::DOTASK_CONFIG).map(PathBuf::from)
}

/// Returns `true` if `NO_COLOR=1`.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `COLOR=1`.
pub fn force_color() -> bool {
    std::env::var(vars::COLOR).is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
