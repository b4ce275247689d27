// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use super::write_json;
use crate::cli::{ConfigCommand, OutputFormat};
use crate::config::{config_path, Config};
use crate::error::{Error, Result};

/// Execute a config subcommand.
pub fn run(cmd: ConfigCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        ConfigCommand::Show { output } => {
            let config = Config::resolve()?;
            show(&config, output.output, out)
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", config_path()?.display())?;
            Ok(())
        }
    }
}

/// Print the effective configuration, including the session file path.
pub fn show(config: &Config, output: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let storage = config.storage_path()?;
    match output {
        OutputFormat::Text => {
            let content = toml::to_string_pretty(config)
                .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
            write!(out, "{}", content)?;
            writeln!(out, "# session file: {}", storage.display())?;
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "endpoint": config.endpoint,
                "logout_url": config.logout_url,
                "timeout_secs": config.timeout_secs,
                "state_dir": config.state_dir()?,
                "session_file": storage,
            });
            write_json(out, &json)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
