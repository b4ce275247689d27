// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for dt-core operations.

use thiserror::Error;

/// All possible errors that can occur in dt-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid status: '{0}'\n  hint: valid statuses are: todo, in_progress, completed")]
    InvalidStatus(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: low, medium, high")]
    InvalidPriority(String),

    #[error("invalid due date: '{0}'\n  hint: use RFC 3339 (2026-01-31T17:00:00Z) or a plain date (2026-01-31)")]
    InvalidDueDate(String),

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("{field} too long ({actual} chars, max {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("too many tags (max {max} per task)")]
    TagLimitExceeded { max: usize },

    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("unknown operation: '{0}'")]
    UnknownOperation(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for dt-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
