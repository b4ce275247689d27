// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-response schema and its mapping into entities.
//!
//! The server is free to omit fields (a partial selection set, a null column,
//! an older schema). Every wire struct therefore accepts missing values, and
//! every mapping into an entity is total: missing or unparsable fields fall
//! back to a fixed default rather than failing.
//!
//! | field kind  | default                    |
//! |-------------|----------------------------|
//! | text        | `""`                       |
//! | status      | [`TaskStatus::Todo`]       |
//! | priority    | [`TaskPriority::Medium`]   |
//! | due date    | `None`                     |
//! | timestamps  | Unix epoch                 |
//! | tags        | empty                      |
//! | category    | `Category { "", "" }`      |

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{AuthPayload, Category, Task, TaskPriority, TaskStatus, User};

/// Parses an RFC 3339 timestamp, returning `None` for anything else.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn timestamp_or_epoch(s: Option<&str>) -> DateTime<Utc> {
    s.and_then(parse_timestamp).unwrap_or(DateTime::UNIX_EPOCH)
}

fn status_or_default(s: Option<&str>) -> TaskStatus {
    s.and_then(|s| s.parse().ok()).unwrap_or_default()
}

fn priority_or_default(s: Option<&str>) -> TaskPriority {
    s.and_then(|s| s.parse().ok()).unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<CategoryNode> for Category {
    fn from(node: CategoryNode) -> Self {
        Category {
            id: node.id.unwrap_or_default(),
            name: node.name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryNode>,
    /// Flat reference used by servers that do not resolve the category.
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<TaskNode> for Task {
    fn from(node: TaskNode) -> Self {
        let category = match (node.category, node.category_id) {
            (Some(category), _) => Category::from(category),
            (None, Some(id)) => Category {
                id,
                name: String::new(),
            },
            (None, None) => Category::default(),
        };
        Task {
            id: node.id.unwrap_or_default(),
            title: node.title.unwrap_or_default(),
            description: node.description.unwrap_or_default(),
            status: status_or_default(node.status.as_deref()),
            priority: priority_or_default(node.priority.as_deref()),
            due_date: node.due_date.as_deref().and_then(parse_timestamp),
            created_at: timestamp_or_epoch(node.created_at.as_deref()),
            updated_at: timestamp_or_epoch(node.updated_at.as_deref()),
            category,
            tags: node.tags.unwrap_or_default(),
        }
    }
}

/// Reduced selection returned by the status-change mutation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TaskStatusNode {
    /// Applies this status change to `task`.
    ///
    /// Only `status` and `updated_at` change. When the server omits a field,
    /// `requested` and `now` fill in for it.
    pub fn apply_to(&self, task: &Task, requested: TaskStatus, now: DateTime<Utc>) -> Task {
        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(requested);
        let updated_at = self
            .updated_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);
        Task {
            status,
            updated_at,
            ..task.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl From<UserNode> for User {
    fn from(node: UserNode) -> Self {
        User {
            id: node.id.unwrap_or_default(),
            name: node.name.unwrap_or_default(),
            email: node.email.unwrap_or_default(),
            created_at: timestamp_or_epoch(node.created_at.as_deref()),
            updated_at: timestamp_or_epoch(node.updated_at.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthPayloadNode {
    #[serde(default)]
    pub user: Option<UserNode>,
    #[serde(default)]
    pub token: Option<String>,
}

impl AuthPayloadNode {
    /// Maps into an [`AuthPayload`], or `None` if the server returned no user.
    ///
    /// A payload without a user cannot establish a session, so it is the one
    /// mapping here that is not total.
    pub fn into_payload(self) -> Option<AuthPayload> {
        let user = self.user?;
        Some(AuthPayload {
            user: User::from(user),
            token: self.token.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
