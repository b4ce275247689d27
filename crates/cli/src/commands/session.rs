// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{BufRead, Write};

use dt_core::{ChangePasswordInput, UpdateProfileInput};

use super::{read_secret, write_json, App};
use crate::api::Transport;
use crate::cli::OutputFormat;
use crate::display::format_user;
use crate::error::{Error, Result};

pub async fn login<T: Transport>(
    app: &App<T>,
    email: &str,
    password: Option<String>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let password = read_secret(password, "Password", input)?;
    let user = app.auth.login(email, &password).await?;
    writeln!(out, "Signed in as {}", format_user(&user))?;
    Ok(())
}

pub async fn register<T: Transport>(
    app: &App<T>,
    name: &str,
    email: &str,
    password: Option<String>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let password = read_secret(password, "Password", input)?;
    let user = app.auth.register(name, email, &password).await?;
    writeln!(out, "Registered and signed in as {}", format_user(&user))?;
    Ok(())
}

pub async fn logout<T: Transport>(app: &App<T>, out: &mut dyn Write) -> Result<()> {
    app.auth.logout().await;
    writeln!(out, "Signed out")?;
    Ok(())
}

pub async fn whoami<T: Transport>(
    app: &App<T>,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let user = app.auth.user().ok_or(Error::AuthenticationRequired)?;
    match output {
        OutputFormat::Text => writeln!(out, "{}", format_user(&user))?,
        OutputFormat::Json => write_json(out, &user)?,
    }
    Ok(())
}

pub async fn profile<T: Transport>(
    app: &App<T>,
    name: Option<String>,
    email: Option<String>,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let user = app
        .auth
        .update_profile(UpdateProfileInput {
            name: name.map(|n| n.trim().to_string()),
            email: email.map(|e| e.trim().to_string()),
        })
        .await?;
    match output {
        OutputFormat::Text => writeln!(out, "Updated profile: {}", format_user(&user))?,
        OutputFormat::Json => write_json(out, &user)?,
    }
    Ok(())
}

pub async fn passwd<T: Transport>(
    app: &App<T>,
    current: Option<String>,
    new_password: Option<String>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    app.require_session().await?;
    let current_password = read_secret(current, "Current password", input)?;
    let new_password = read_secret(new_password, "New password", input)?;
    app.auth
        .change_password(ChangePasswordInput {
            current_password,
            new_password,
        })
        .await?;
    writeln!(out, "Password changed")?;
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
