// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::api::TransportError;
use crate::storage::StorageError;

/// Coarse classification of a failure.
///
/// Stores branch on this tag (never on message text) to decide, for
/// example, whether a failure should clear a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network unreachable, timeout, TLS, and similar.
    Network,
    /// Non-success HTTP status without a GraphQL error body.
    Http,
    /// The server answered with an `errors` list.
    Server,
    /// No session, or the server rejected the session.
    AuthenticationRequired,
    /// Input rejected before any request was issued.
    Validation,
    /// Response was missing data or had the wrong shape.
    MalformedResponse,
    /// Local failure: storage, config, I/O.
    Local,
}

/// All possible errors that can occur in the dtrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication required\n  hint: run 'dotask login' first")]
    AuthenticationRequired,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Invalid(#[from] dt_core::Error),

    #[error("no category available for the new task\n  hint: create one with 'dotask category new <name>'")]
    NoCategory,

    #[error("unknown category '{0}'\n  hint: list categories with 'dotask category list'")]
    UnknownCategory(String),

    #[error("category {id} is still used by {count} task(s)\n  hint: move or delete those tasks first")]
    CategoryInUse { id: String, count: usize },

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("nothing to update\n  hint: pass at least one field to change")]
    NothingToUpdate,

    #[error("server refused to {0}")]
    Refused(&'static str),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AuthenticationRequired => ErrorKind::AuthenticationRequired,
            Error::Transport(e) => e.kind(),
            Error::Invalid(_)
            | Error::NoCategory
            | Error::UnknownCategory(_)
            | Error::CategoryInUse { .. }
            | Error::NothingToUpdate => ErrorKind::Validation,
            Error::TaskNotFound(_) | Error::Refused(_) => ErrorKind::Server,
            Error::Storage(_) | Error::Config(_) | Error::Io(_) | Error::Json(_) => {
                ErrorKind::Local
            }
        }
    }

    /// True if the failure means the session is missing or was rejected.
    pub fn is_auth_failure(&self) -> bool {
        self.kind() == ErrorKind::AuthenticationRequired
    }
}

/// A specialized Result type for dtrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
