// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ANSI coloring for help text and task listings.
//!
//! `NO_COLOR` turns coloring off, `COLOR` forces it on when stdout is not a
//! terminal. Otherwise colors follow whether stdout is a TTY.

use std::io::IsTerminal;

use dt_core::{TaskPriority, TaskStatus};

use crate::env;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers
    pub const HEADER: u8 = 74;
    /// Commands and literals
    pub const LITERAL: u8 = 250;
    /// Placeholders, defaults, secondary text
    pub const CONTEXT: u8 = 245;
    pub const TODO: u8 = 252;
    pub const IN_PROGRESS: u8 = 179;
    pub const COMPLETED: u8 = 108;
    pub const HIGH: u8 = 167;
}

const RESET: &str = "\x1b[0m";

pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn paint(code: u8, text: &str) -> String {
    format!("\x1b[38;5;{code}m{text}{RESET}")
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

/// Status label, colored when `colorize` is set.
pub fn status(status: TaskStatus, colorize: bool) -> String {
    let label = status.as_str();
    if !colorize {
        return label.to_string();
    }
    let code = match status {
        TaskStatus::Todo => codes::TODO,
        TaskStatus::InProgress => codes::IN_PROGRESS,
        TaskStatus::Completed => codes::COMPLETED,
    };
    paint(code, label)
}

/// Priority label; only `high` is highlighted.
pub fn priority(priority: TaskPriority, colorize: bool) -> String {
    let label = priority.as_str();
    if colorize && priority == TaskPriority::High {
        paint(codes::HIGH, label)
    } else {
        label.to_string()
    }
}

/// Highlight an `after_help` examples block.
///
/// Lines ending in `:` are headers. In `  dotask cmd args    Description`
/// lines, the command column is a literal.
pub fn examples(text: &str) -> String {
    examples_with(text, should_colorize())
}

fn examples_with(text: &str, colorize: bool) -> String {
    if !colorize {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + 128);
    for line in text.lines() {
        if !result.is_empty() {
            result.push('\n');
        }
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];

        if trimmed.ends_with(':') && !trimmed.contains("  ") {
            result.push_str(indent);
            result.push_str(&header(trimmed));
        } else if let Some(end) = trimmed.find("  ") {
            result.push_str(indent);
            result.push_str(&literal(&trimmed[..end]));
            result.push_str(&trimmed[end..]);
        } else {
            result.push_str(line);
        }
    }
    result
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
