// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML configuration, loaded once at startup and passed by reference.

use crate::attempt::Stage;
use crate::command::StageCommand;
use crate::input::{InputFormat, DEFAULT_INPUT_PATTERN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file found (pass --config or set TANDEM_CONFIG)")]
    NotFound,
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("stages.{stage}.command must not be empty")]
    EmptyCommand { stage: Stage },
    #[error("stages.{stage}.command uses unknown placeholder `{name}` (known: path, input)")]
    UnknownPlaceholder { stage: Stage, name: String },
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("input.pattern is not a valid regex: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("{field} does not exist: {}", .path.display())]
    MissingPath { field: &'static str, path: PathBuf },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    VolumeRange { field: &'static str, value: f64 },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub locator: LocatorConfig,
    pub input: InputConfig,
    pub stages: StagesConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// How the target executable is located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case", deny_unknown_fields)]
pub enum LocatorConfig {
    /// A configured path, emitted once at startup
    FixedPath { path: PathBuf },
    /// Poll the focused window and emit its executable when it matches
    FocusedWindow {
        #[serde(rename = "match", default = "default_window_match")]
        pattern: String,
        #[serde(default = "default_locator_poll_ms")]
        poll_interval_ms: u64,
    },
}

/// Where input data comes from and what counts as well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(flatten)]
    pub source: InputSource,
    #[serde(default = "default_input_pattern")]
    pub pattern: String,
    #[serde(default = "default_true")]
    pub strip_whitespace: bool,
    #[serde(default = "default_input_poll_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum InputSource {
    /// Poll a clipboard read command (platform default when unset)
    Clipboard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        command: Option<Vec<String>>,
    },
    /// Poll a file's contents
    File { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StagesConfig {
    pub generate: StageCommand,
    pub upload: StageCommand,
}

impl StagesConfig {
    pub fn get(&self, stage: Stage) -> &StageCommand {
        match stage {
            Stage::Generate => &self.generate,
            Stage::Upload => &self.upload,
        }
    }
}

/// How job transitions are surfaced to the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case", deny_unknown_fields)]
pub enum NotifyConfig {
    /// Desktop notification per transition
    Desktop,
    /// Play a sound file per transition through an external player.
    ///
    /// `${volume}` in the player argv expands to the cue's volume (0.0 to 1.0).
    Sound {
        #[serde(default = "default_sound_player")]
        player: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        success: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        failure: Option<PathBuf>,
        #[serde(default = "default_volume")]
        start_volume: f64,
        #[serde(default = "default_volume")]
        success_volume: f64,
        #[serde(default = "default_volume")]
        failure_volume: f64,
    },
    /// Log lines only
    #[default]
    Log,
    #[serde(rename = "none")]
    Silent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// How long `run` waits for a superseded worker before giving up
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { stop_timeout_ms: default_stop_timeout_ms() }
    }
}

impl PipelineConfig {
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

impl InputConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn format(&self) -> Result<InputFormat, ConfigError> {
        Ok(InputFormat::new(&self.pattern, self.strip_whitespace)?)
    }
}

fn default_window_match() -> String {
    "factorio".to_string()
}

fn default_locator_poll_ms() -> u64 {
    2000
}

fn default_input_pattern() -> String {
    DEFAULT_INPUT_PATTERN.to_string()
}

fn default_true() -> bool {
    true
}

fn default_input_poll_ms() -> u64 {
    500
}

fn default_stop_timeout_ms() -> u64 {
    1000
}

fn default_sound_player() -> Vec<String> {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["afplay", "-v", "${volume}"]
    } else {
        &["pw-play", "--volume", "${volume}"]
    };
    argv.iter().map(|a| a.to_string()).collect()
}

fn default_volume() -> f64 {
    0.5
}

impl Config {
    /// Read, resolve, and validate the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let config = Self::parse(&text, base_dir)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML and resolve relative paths against `base_dir`.
    ///
    /// Does not validate; call [`Config::validate`] afterwards.
    pub fn parse(text: &str, base_dir: &Path) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(text)?;
        config.resolve_paths(base_dir);
        Ok(config)
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };

        if let LocatorConfig::FixedPath { path } = &mut self.locator {
            resolve(path);
        }
        if let InputSource::File { path } = &mut self.input.source {
            resolve(path);
        }
        for stage in [&mut self.stages.generate, &mut self.stages.upload] {
            if let Some(cwd) = &mut stage.cwd {
                resolve(cwd);
            }
        }
        if let NotifyConfig::Sound { start, success, failure, .. } = &mut self.notify {
            for p in [start, success, failure].into_iter().flatten() {
                resolve(p);
            }
        }
    }

    /// Check everything that can be checked before any provider starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.locator {
            LocatorConfig::FixedPath { path } => {
                require_exists("locator.path", path)?;
            }
            LocatorConfig::FocusedWindow { pattern, poll_interval_ms } => {
                if pattern.trim().is_empty() {
                    return Err(ConfigError::Empty { field: "locator.match" });
                }
                require_nonzero("locator.poll_interval_ms", *poll_interval_ms)?;
            }
        }

        match &self.input.source {
            InputSource::Clipboard { command: Some(command) } if command.is_empty() => {
                return Err(ConfigError::Empty { field: "input.command" });
            }
            InputSource::File { path } => require_exists("input.path", path)?,
            InputSource::Clipboard { .. } => {}
        }
        require_nonzero("input.poll_interval_ms", self.input.poll_interval_ms)?;
        self.input.format()?;

        for stage in Stage::ALL {
            let command = self.stages.get(stage);
            if command.command.is_empty() {
                return Err(ConfigError::EmptyCommand { stage });
            }
            if let Some(name) = command.unknown_placeholders().into_iter().next() {
                return Err(ConfigError::UnknownPlaceholder { stage, name });
            }
            if let Some(cwd) = &command.cwd {
                require_exists("stages.cwd", cwd)?;
            }
        }

        if let NotifyConfig::Sound {
            player,
            start,
            success,
            failure,
            start_volume,
            success_volume,
            failure_volume,
        } = &self.notify
        {
            if player.is_empty() {
                return Err(ConfigError::Empty { field: "notify.player" });
            }
            for (field, volume) in [
                ("notify.start_volume", start_volume),
                ("notify.success_volume", success_volume),
                ("notify.failure_volume", failure_volume),
            ] {
                if !(0.0..=1.0).contains(volume) {
                    return Err(ConfigError::VolumeRange { field, value: *volume });
                }
            }
            for (field, path) in [
                ("notify.start", start),
                ("notify.success", success),
                ("notify.failure", failure),
            ] {
                if let Some(path) = path {
                    require_exists(field, path)?;
                }
            }
        }

        require_nonzero("pipeline.stop_timeout_ms", self.pipeline.stop_timeout_ms)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

fn require_exists(field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConfigError::MissingPath { field, path: path.to_path_buf() })
    }
}

fn require_nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroDuration { field })
    } else {
        Ok(())
    }
}

/// Commented starting point written by `tandem config init`.
pub const EXAMPLE_CONFIG: &str = r#"# tandem configuration

[locator]
# "fixed_path" emits `path` once; "focused_window" polls the focused window
method = "focused_window"
match = "factorio"
poll_interval_ms = 2000

[input]
# "clipboard" polls a clipboard read command; "file" polls `path`
method = "clipboard"
poll_interval_ms = 500
strip_whitespace = true

[stages.generate]
command = ["python", "-m", "preview_generator", "${path}", "${input}"]

[stages.upload]
command = ["python", "-m", "uploader", "${path}"]

[notify]
# "desktop", "sound", "log", or "none"
method = "log"

[pipeline]
stop_timeout_ms = 1000
"#;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
