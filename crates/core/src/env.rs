// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::path::PathBuf;

/// Resolve the config file: TANDEM_CONFIG > XDG_CONFIG_HOME/tandem > platform config dir
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TANDEM_CONFIG") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("tandem").join("config.toml"));
        }
    }
    dirs::config_dir().map(|dir| dir.join("tandem").join("config.toml"))
}

/// Directory for rolling log files, if file logging was requested.
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("TANDEM_LOG_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
