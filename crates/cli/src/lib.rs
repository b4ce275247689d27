// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dtrs - client library for the dotask task server.
//!
//! This crate provides the client side of the `dotask` CLI: a GraphQL
//! transport, a client-side session store, and two reactive stores that
//! mirror server state.
//!
//! # Main Components
//!
//! - [`api`] - Transport binding ([`HttpTransport`]) and [`GraphqlClient`] with its query cache
//! - [`storage`] - Persisted client-side keys (access token, username, cached tasks)
//! - [`auth`] - [`AuthStore`]: session lifecycle (login, register, logout, session check)
//! - [`store`] - [`DataStore`]: task and category collections with loading/error flags
//! - [`Config`] - Endpoint configuration with environment overrides
//! - [`Error`] - Error types for all operations
//!
//! # Wiring
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dtrs::{AuthStore, Config, DataStore, FileStorage, GraphqlClient, HttpTransport};
//!
//! let config = Config::resolve()?;
//! let storage = Arc::new(FileStorage::open(&config.storage_path()?)?);
//! let transport = HttpTransport::new(config.transport_config())?;
//! let client = Arc::new(GraphqlClient::new(transport, storage));
//! let auth = AuthStore::new(Arc::clone(&client), navigator);
//! let data = DataStore::new(client, auth.clone());
//!
//! if auth.check_auth().await {
//!     data.initialize_data().await;
//! }
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
mod help;

pub mod api;
pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod storage;
pub mod store;

#[cfg(test)]
mod test_helpers;

pub use api::{
    FetchPolicy, GraphqlClient, HttpTransport, Transport, TransportConfig, TransportError,
};
pub use auth::{AuthPhase, AuthState, AuthStore, Navigator, Route};
pub use cli::{CategoryCommand, Cli, Command, ConfigCommand, OutputFormat, TaskCommand};
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{DataStore, StoreState};

use commands::task::TaskFilter;
use commands::{category, session, task, App};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub async fn run(command: Command) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let out: &mut dyn std::io::Write = &mut stdout;

    if let Command::Config(cmd) = command {
        return commands::config::run(cmd, out);
    }

    let config = Config::resolve()?;
    let app = App::open(&config, colors::should_colorize())?;
    let mut stdin = std::io::stdin().lock();
    let input: &mut dyn std::io::BufRead = &mut stdin;

    match command {
        Command::Login { email, password } => {
            session::login(&app, &email, password, input, out).await
        }
        Command::Register {
            name,
            email,
            password,
        } => session::register(&app, &name, &email, password, input, out).await,
        Command::Logout => session::logout(&app, out).await,
        Command::Whoami { output } => session::whoami(&app, output.output, out).await,
        Command::Profile {
            name,
            email,
            output,
        } => session::profile(&app, name, email, output.output, out).await,
        Command::Passwd {
            current,
            new_password,
        } => session::passwd(&app, current, new_password, input, out).await,
        Command::Task(cmd) => match cmd {
            TaskCommand::List {
                status,
                category,
                priority,
                cached,
                output,
            } => {
                let filter = TaskFilter {
                    status,
                    category,
                    priority,
                };
                task::list(&app, filter, cached, output.output, out).await
            }
            TaskCommand::Show { id, output } => task::show(&app, &id, output.output, out).await,
            TaskCommand::New {
                title,
                status,
                fields,
                output,
            } => task::new(&app, title, status, fields, output.output, out).await,
            TaskCommand::Edit {
                id,
                title,
                fields,
                output,
            } => task::edit(&app, &id, title, fields, output.output, out).await,
            TaskCommand::Status { id, status } => task::status(&app, &id, status, out).await,
            TaskCommand::Rm { id } => task::remove(&app, &id, out).await,
        },
        Command::Category(cmd) => match cmd {
            CategoryCommand::List { output } => category::list(&app, output.output, out).await,
            CategoryCommand::New { name } => category::new(&app, &name, out).await,
            CategoryCommand::Rename { category, name } => {
                category::rename(&app, &category, &name, out).await
            }
            CategoryCommand::Rm { category } => category::remove(&app, &category, out).await,
        },
        Command::Config(_) => Ok(()),
    }
}
