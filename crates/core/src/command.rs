// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage command templates and their rendered form.

use crate::template::{interpolate, placeholders};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Placeholder names a stage template may reference.
pub const KNOWN_PLACEHOLDERS: [&str; 2] = ["path", "input"];

/// Configured argv template for one stage.
///
/// Each element may contain `${path}` (the executable location) and
/// `${input}` (the validated input data). No shell is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageCommand {
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl StageCommand {
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { command: command.into_iter().map(Into::into).collect(), cwd: None, env: BTreeMap::new() }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Placeholders that are neither `path` nor `input`.
    pub fn unknown_placeholders(&self) -> Vec<String> {
        self.command
            .iter()
            .flat_map(|arg| placeholders(arg))
            .filter(|name| !KNOWN_PLACEHOLDERS.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Substitute the trigger values into every argv element.
    ///
    /// Returns `None` for an empty command.
    pub fn render(&self, path: &Path, input: &str) -> Option<RenderedCommand> {
        let path_str = path.to_string_lossy();
        let vars: HashMap<&str, &str> = HashMap::from([("path", &*path_str), ("input", input)]);

        let mut argv = self.command.iter().map(|arg| interpolate(arg, &vars));
        let program = argv.next()?;
        Some(RenderedCommand {
            program,
            args: argv.collect(),
            cwd: self.cwd.clone(),
            env: self.env.iter().map(|(k, v)| (k.clone(), interpolate(v, &vars))).collect(),
        })
    }
}

/// A concrete command line ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl RenderedCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Full argv for logging, program first.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str)).collect()
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
