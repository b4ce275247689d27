// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use super::{resolve_category, write_json, App};
use crate::api::Transport;
use crate::cli::OutputFormat;
use crate::display::format_category_line;
use crate::error::Result;

/// List categories with the number of tasks in each.
pub async fn list<T: Transport>(
    app: &App<T>,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let categories = app.data.load_categories().await?;
    let tasks = app.data.load_tasks().await?;
    let count = |id: &str| tasks.iter().filter(|t| t.category.id == id).count();

    match output {
        OutputFormat::Text => {
            if categories.is_empty() {
                writeln!(out, "No categories found.")?;
            }
            for category in &categories {
                writeln!(out, "{}", format_category_line(category, count(&category.id)))?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = categories
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id,
                        "name": c.name,
                        "task_count": count(&c.id),
                    })
                })
                .collect();
            write_json(out, &rows)?;
        }
    }
    Ok(())
}

pub async fn new<T: Transport>(app: &App<T>, name: &str, out: &mut dyn Write) -> Result<()> {
    app.require_session().await?;
    let category = app.data.create_category(name).await?;
    writeln!(out, "Created category ({}) {}", category.id, category.name)?;
    Ok(())
}

pub async fn rename<T: Transport>(
    app: &App<T>,
    key: &str,
    name: &str,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let categories = app.data.load_categories().await?;
    let current = resolve_category(&categories, key)?;
    let renamed = app.data.update_category(&current.id, name).await?;
    writeln!(out, "Renamed '{}' to '{}'", current.name, renamed.name)?;
    Ok(())
}

/// Delete a category. Tasks are loaded first so the in-use check sees them.
pub async fn remove<T: Transport>(app: &App<T>, key: &str, out: &mut dyn Write) -> Result<()> {
    app.require_session().await?;
    let categories = app.data.load_categories().await?;
    app.data.load_tasks().await?;
    let category = resolve_category(&categories, key)?;
    app.data.delete_category(&category.id).await?;
    writeln!(out, "Deleted category ({}) {}", category.id, category.name)?;
    Ok(())
}

#[cfg(test)]
#[path = "category_tests.rs"]
mod tests;
