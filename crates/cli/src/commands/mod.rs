// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod category;
pub mod config;
pub mod session;
pub mod task;

use std::io::{BufRead, Write};
use std::sync::Arc;

use dt_core::Category;

use crate::api::{GraphqlClient, HttpTransport, Transport};
use crate::auth::{AuthStore, Navigator, Route};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{FileStorage, Storage};
use crate::store::DataStore;

/// Stores wired to one client, shared by every command.
pub struct App<T: Transport> {
    pub auth: AuthStore<T>,
    pub data: DataStore<T>,
    pub colorize: bool,
}

impl App<HttpTransport> {
    /// Wire the HTTP transport and the session file named by `config`.
    pub fn open(config: &Config, colorize: bool) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.storage_path()?)?);
        let transport = HttpTransport::new(config.transport_config())?;
        let client = Arc::new(GraphqlClient::new(transport, storage));
        let auth = AuthStore::new(Arc::clone(&client), Arc::new(TerminalNavigator));
        let data = DataStore::new(client, auth.clone());
        Ok(App::new(auth, data, colorize))
    }
}

impl<T: Transport> App<T> {
    pub fn new(auth: AuthStore<T>, data: DataStore<T>, colorize: bool) -> Self {
        App {
            auth,
            data,
            colorize,
        }
    }

    /// Confirm the stored session with the server.
    pub async fn require_session(&self) -> Result<()> {
        if self.auth.check_auth().await {
            Ok(())
        } else {
            Err(Error::AuthenticationRequired)
        }
    }
}

/// Prints the next step after a session change.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        match route {
            Route::Home => eprintln!("hint: run 'dotask task list' to see your tasks"),
            Route::Login => eprintln!("hint: run 'dotask login <email>' to sign in again"),
        }
    }
}

/// Find a category by id, then by case-insensitive name.
pub(crate) fn resolve_category(categories: &[Category], key: &str) -> Result<Category> {
    let key = key.trim();
    categories
        .iter()
        .find(|c| c.id == key)
        .or_else(|| categories.iter().find(|c| c.name.eq_ignore_ascii_case(key)))
        .cloned()
        .ok_or_else(|| Error::UnknownCategory(key.to_string()))
}

/// Use `given`, or read one line from `input` after prompting on stderr.
pub(crate) fn read_secret(
    given: Option<String>,
    prompt: &str,
    input: &mut dyn BufRead,
) -> Result<String> {
    if let Some(value) = given {
        return Ok(value);
    }
    eprint!("{}: ", prompt);
    std::io::stderr().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

pub(crate) fn write_json<V: serde::Serialize>(out: &mut dyn Write, value: &V) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
