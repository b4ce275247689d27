// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering of tasks, categories, and users.

use chrono::{DateTime, Utc};
use dt_core::{Category, Task, User};

use crate::colors;

/// Maximum line width for wrapped descriptions (excluding the indent).
const WRAP_WIDTH: usize = 96;

fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Wrap a single-line text at word boundaries.
///
/// Text that already contains newlines is returned unchanged.
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.len() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// One-line summary: `- [status] (id) title  priority  category  due  #tags`.
pub fn format_task_line(task: &Task, colorize: bool) -> String {
    let mut line = format!(
        "- [{}] ({}) {}",
        colors::status(task.status, colorize),
        task.id,
        task.title
    );
    line.push_str(&format!("  {}", colors::priority(task.priority, colorize)));
    if !task.category.name.is_empty() {
        line.push_str(&format!("  @{}", task.category.name));
    }
    if let Some(due) = &task.due_date {
        line.push_str(&format!("  due {}", date(due)));
    }
    for tag in &task.tags {
        line.push_str(&format!("  #{}", tag));
    }
    line
}

/// Multi-line detail view.
pub fn format_task_detail(task: &Task, colorize: bool) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {}", task.id, task.title),
        format!("Status: {}", colors::status(task.status, colorize)),
        format!("Priority: {}", colors::priority(task.priority, colorize)),
    ];
    let category = if task.category.name.is_empty() {
        task.category.id.clone()
    } else {
        format!("{} ({})", task.category.name, task.category.id)
    };
    lines.push(format!("Category: {}", category));
    if let Some(due) = &task.due_date {
        lines.push(format!("Due: {}", date(due)));
    }
    if !task.tags.is_empty() {
        lines.push(format!("Tags: {}", task.tags.join(", ")));
    }
    lines.push(format!("Created: {}", timestamp(&task.created_at)));
    lines.push(format!("Updated: {}", timestamp(&task.updated_at)));

    if !task.description.is_empty() {
        lines.push(String::new());
        lines.push("Description:".to_string());
        for line in wrap_text(&task.description, WRAP_WIDTH).lines() {
            lines.push(format!("    {}", line));
        }
    }
    lines
}

pub fn format_category_line(category: &Category, task_count: usize) -> String {
    let noun = if task_count == 1 { "task" } else { "tasks" };
    format!("({}) {}: {} {}", category.id, category.name, task_count, noun)
}

pub fn format_user(user: &User) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.id)
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
