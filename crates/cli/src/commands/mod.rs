// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod once;
pub mod watch;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tandem_core::{Config, ConfigError};

/// The config file to use: `--config`, then the environment defaults.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    explicit
        .map(Path::to_path_buf)
        .or_else(tandem_core::env::config_path)
        .ok_or(ConfigError::NotFound)
}

/// Load and validate the config for a command.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit)?;
    let config = Config::load(&path)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
