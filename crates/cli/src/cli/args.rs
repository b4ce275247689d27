// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` so `task new` and
//! `task edit` accept the same field flags.

use clap::Args;
use dt_core::TaskPriority;

use super::{parse_priority, OutputFormat};

/// Optional task fields settable on create and edit.
#[derive(Args, Clone, Debug, Default)]
pub struct TaskFieldArgs {
    /// Longer description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Priority (low, medium, high)
    #[arg(long, short, value_parser = parse_priority)]
    pub priority: Option<TaskPriority>,

    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,

    /// Category id or name
    #[arg(long, short)]
    pub category: Option<String>,

    /// Tag(s) (comma-separated or repeated)
    #[arg(long = "tag", short, value_delimiter = ',')]
    pub tags: Vec<String>,
}

/// Output format flag.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct OutputArgs {
    /// Output format (text, json)
    #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,
}
