// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use dt_core::model::parse_due_date;
use dt_core::{CreateTaskInput, Task, TaskPriority, TaskStatus, UpdateTaskInput};

use super::{resolve_category, write_json, App};
use crate::api::Transport;
use crate::cli::{OutputFormat, TaskFieldArgs};
use crate::display::{format_task_detail, format_task_line};
use crate::error::Result;

/// Filters applied to `task list`.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Category id or case-insensitive name.
    pub category: Option<String>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        match &self.category {
            Some(key) => task.category.id == *key || task.category.name.eq_ignore_ascii_case(key),
            None => true,
        }
    }
}

fn print_task<T: Transport>(
    app: &App<T>,
    task: &Task,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match output {
        OutputFormat::Text => {
            for line in format_task_detail(task, app.colorize) {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => write_json(out, task)?,
    }
    Ok(())
}

/// List tasks from the server, or from the local cache with `cached`.
pub async fn list<T: Transport>(
    app: &App<T>,
    filter: TaskFilter,
    cached: bool,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let tasks = if cached {
        app.data.restore_cached_tasks();
        app.data.tasks()
    } else {
        app.require_session().await?;
        app.data.load_tasks().await?
    };
    let tasks: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();

    match output {
        OutputFormat::Text => {
            if tasks.is_empty() {
                writeln!(out, "No tasks found.")?;
            }
            for task in tasks {
                writeln!(out, "{}", format_task_line(task, app.colorize))?;
            }
        }
        OutputFormat::Json => write_json(out, &tasks)?,
    }
    Ok(())
}

pub async fn show<T: Transport>(
    app: &App<T>,
    id: &str,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let task = app.data.get_task(id).await?;
    print_task(app, &task, output, out)
}

pub async fn new<T: Transport>(
    app: &App<T>,
    title: String,
    status: Option<TaskStatus>,
    fields: TaskFieldArgs,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let categories = app.data.load_categories().await?;
    let category_id = match &fields.category {
        Some(key) => resolve_category(&categories, key)?.id,
        None => String::new(),
    };
    let due_date = fields.due.as_deref().map(parse_due_date).transpose()?;

    let input = CreateTaskInput {
        title: title.trim().to_string(),
        description: fields.description.unwrap_or_default(),
        status: status.unwrap_or_default(),
        priority: fields.priority.unwrap_or_default(),
        due_date,
        category_id,
        tags: fields.tags,
    };
    let task = app.data.create_task(input).await?;
    match output {
        OutputFormat::Text => writeln!(out, "Created {}", format_task_line(&task, app.colorize))?,
        OutputFormat::Json => write_json(out, &task)?,
    }
    Ok(())
}

pub async fn edit<T: Transport>(
    app: &App<T>,
    id: &str,
    title: Option<String>,
    fields: TaskFieldArgs,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let category_id = match &fields.category {
        Some(key) => {
            let categories = app.data.load_categories().await?;
            Some(resolve_category(&categories, key)?.id)
        }
        None => None,
    };
    let input = UpdateTaskInput {
        title: title.map(|t| t.trim().to_string()),
        description: fields.description,
        status: None,
        priority: fields.priority,
        due_date: fields.due.as_deref().map(parse_due_date).transpose()?,
        category_id,
        tags: if fields.tags.is_empty() { None } else { Some(fields.tags) },
    };
    let task = app.data.update_task(id, input).await?;
    print_task(app, &task, output, out)
}

pub async fn status<T: Transport>(
    app: &App<T>,
    id: &str,
    status: TaskStatus,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let task = app.data.update_task_status(id, status).await?;
    writeln!(out, "{} is now {}", task.id, task.status)?;
    Ok(())
}

pub async fn remove<T: Transport>(app: &App<T>, id: &str, out: &mut dyn Write) -> Result<()> {
    app.require_session().await?;
    app.data.delete_task(id).await?;
    writeln!(out, "Deleted {}", id)?;
    Ok(())
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
