// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is read from `<config_dir>/dotask/config.toml` (or the file
//! named by `DOTASK_CONFIG`) and includes:
//! - `endpoint`: GraphQL endpoint (default `http://localhost:8080/query`)
//! - `logout_url`: session-cookie logout endpoint (default `http://localhost:5173/api/logout`)
//! - `timeout_secs`: per-request timeout
//! - `state_dir`: where the client-side session file lives
//!
//! A missing file is not an error; every field has a default. Environment
//! variables override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::TransportConfig;
use crate::env;
use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "dotask";
const CONFIG_FILE_NAME: &str = "config.toml";
const SESSION_FILE_NAME: &str = "session.json";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/query";
pub const DEFAULT_LOGOUT_URL: &str = "http://localhost:5173/api/logout";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_logout_url() -> String {
    DEFAULT_LOGOUT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Client configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_logout_url")]
    pub logout_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Overrides the platform state directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: default_endpoint(),
            logout_url: default_logout_url(),
            timeout_secs: default_timeout_secs(),
            state_dir: None,
        }
    }
}

/// Values taken from the environment, applied on top of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub endpoint: Option<String>,
    pub logout_url: Option<String>,
    pub state_dir: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        EnvOverrides {
            endpoint: env::endpoint(),
            logout_url: env::logout_url(),
            state_dir: env::state_dir(),
        }
    }
}

impl Config {
    /// Loads the config file at `path`, falling back to defaults if absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Loads the active config: the file, then environment overrides, then
    /// validation.
    pub fn resolve() -> Result<Self> {
        let mut config = Config::load(&config_path()?)?;
        config.apply(EnvOverrides::from_env());
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: EnvOverrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(logout_url) = overrides.logout_url {
            self.logout_url = logout_url;
        }
        if let Some(state_dir) = overrides.state_dir {
            self.state_dir = Some(state_dir);
        }
    }

    /// Checks that both URLs are http(s) and the timeout is positive.
    pub fn validate(&self) -> Result<()> {
        check_url("endpoint", &self.endpoint)?;
        check_url("logout_url", &self.logout_url)?;
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Saves configuration to `path`, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Directory holding the session file.
    pub fn state_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|d| d.join(APP_DIR_NAME))
            .ok_or_else(|| {
                Error::Config(
                    "cannot determine a state directory; set DOTASK_STATE_DIR".to_string(),
                )
            })
    }

    /// Path of the client-side session file.
    pub fn storage_path(&self) -> Result<PathBuf> {
        Ok(self.state_dir()?.join(SESSION_FILE_NAME))
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            endpoint: self.endpoint.clone(),
            logout_url: self.logout_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn check_url(field: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "invalid {} '{}': must start with http:// or https://",
            field, url
        )))
    }
}

/// Path of the config file: `DOTASK_CONFIG`, else the platform config dir.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = env::config_path() {
        return Ok(path);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            Error::Config("cannot determine a config directory; set DOTASK_CONFIG".to_string())
        })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
