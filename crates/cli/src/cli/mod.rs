// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use dt_core::{TaskPriority, TaskStatus};

pub use args::{OutputArgs, TaskFieldArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

pub(crate) fn parse_status(s: &str) -> Result<TaskStatus, String> {
    s.parse().map_err(|e: dt_core::Error| e.to_string())
}

pub(crate) fn parse_priority(s: &str) -> Result<TaskPriority, String> {
    s.parse().map_err(|e: dt_core::Error| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "dotask")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the dotask task server")]
#[command(
    long_about = "Terminal client for the dotask task server.\n\n\
    Signs in against the GraphQL endpoint, then lists and edits tasks and categories."
)]
#[command(styles = help::styles())]
pub struct Cli {
    /// Log requests and store activity to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// Sign in
    #[command(after_help = colors::examples("\
Examples:
  dotask login ada@example.com             Prompt for the password on stdin
  dotask login ada@example.com -p secret   Pass the password inline"))]
    Login {
        /// Account email
        #[arg(value_parser = non_empty_string)]
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Account email
        #[arg(value_parser = non_empty_string)]
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Sign out and forget the local session
    Logout,

    /// Show the signed-in user
    Whoami {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Change your name or email
    #[command(group = clap::ArgGroup::new("profile_fields")
        .args(["name", "email"])
        .required(true)
        .multiple(true))]
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New email
        #[arg(long)]
        email: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Change your password
    Passwd {
        /// Current password (read from stdin when omitted)
        #[arg(long)]
        current: Option<String>,

        /// New password (read from stdin when omitted)
        #[arg(long = "new")]
        new_password: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Work with tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Work with categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Inspect client configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// List tasks
    #[command(after_help = colors::examples("\
Examples:
  dotask task list                   List all tasks
  dotask task list -s in_progress    Only tasks in progress
  dotask task list -c Development    Only tasks in one category
  dotask task list -o json           Output in JSON format"))]
    List {
        /// Filter by status (todo, in_progress, completed)
        #[arg(long, short, value_parser = parse_status)]
        status: Option<TaskStatus>,

        /// Filter by category id or name
        #[arg(long, short)]
        category: Option<String>,

        /// Filter by priority (low, medium, high)
        #[arg(long, short, value_parser = parse_priority)]
        priority: Option<TaskPriority>,

        /// Serve from the local task cache without contacting the server
        #[arg(long)]
        cached: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one task
    Show {
        /// Task id
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Create a task
    #[command(after_help = colors::examples("\
Examples:
  dotask task new \"Write report\"                 Use the first category
  dotask task new \"Fix bug\" -c Development -p high
  dotask task new \"Plan\" --due 2026-12-01 -t q4,planning"))]
    New {
        /// Title
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Initial status
        #[arg(long, short, value_parser = parse_status)]
        status: Option<TaskStatus>,

        #[command(flatten)]
        fields: TaskFieldArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Change fields of a task
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: TaskFieldArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Move a task to another status
    #[command(after_help = colors::examples("\
Examples:
  dotask task status t1 in_progress   Start work
  dotask task status t1 done          Complete"))]
    Status {
        /// Task id
        id: String,

        /// New status (todo, in_progress, completed)
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// List categories
    List {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Create a category
    New {
        /// Category name
        #[arg(value_parser = non_empty_string)]
        name: String,
    },

    /// Rename a category
    Rename {
        /// Category id or current name
        category: String,

        /// New name
        #[arg(value_parser = non_empty_string)]
        name: String,
    },

    /// Delete a category that no task uses
    Rm {
        /// Category id or name
        category: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the config file path
    Path,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
