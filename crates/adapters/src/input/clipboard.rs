// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::poll::{Poller, Probe};
use crate::provider::{Callback, Provider, ProviderError};
use crate::subprocess::{command_from_argv, run_with_timeout, CLIPBOARD_TIMEOUT};
use async_trait::async_trait;
use std::time::Duration;
use tandem_core::InputFormat;

/// Clipboard read command for the current platform and session.
pub fn default_clipboard_command() -> Vec<String> {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["pbpaste"]
    } else if cfg!(windows) {
        &["powershell", "-NoProfile", "-Command", "Get-Clipboard"]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &["wl-paste", "--no-newline"]
    } else {
        &["xclip", "-o", "-selection", "clipboard"]
    };
    argv.iter().map(|s| s.to_string()).collect()
}

/// Polls a clipboard read command for well-formed input.
pub struct ClipboardProvider {
    command: Vec<String>,
    format: InputFormat,
    interval: Duration,
    poller: Option<Poller>,
}

impl ClipboardProvider {
    pub fn new(command: Vec<String>, format: InputFormat, interval: Duration) -> Self {
        Self { command, format, interval, poller: None }
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }
}

struct ClipboardProbe {
    command: Vec<String>,
    label: String,
    format: InputFormat,
}

#[async_trait]
impl Probe for ClipboardProbe {
    type Item = String;

    async fn probe(&mut self) -> Result<Option<String>, ProviderError> {
        let Some(cmd) = command_from_argv(&self.command) else {
            return Err(ProviderError::BadOutput {
                command: self.label.clone(),
                output: "empty command".to_string(),
            });
        };
        let output = run_with_timeout(cmd, CLIPBOARD_TIMEOUT, &self.label).await?;
        if !output.status.success() {
            return Err(ProviderError::CommandFailed {
                command: self.label.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let raw = String::from_utf8_lossy(&output.stdout);
        let value = self.format.sanitize(&raw);
        if value.is_none() && !raw.trim().is_empty() {
            tracing::trace!(len = raw.len(), "clipboard content does not match input format");
        }
        Ok(value)
    }
}

#[async_trait]
impl Provider for ClipboardProvider {
    type Item = String;

    fn name(&self) -> &'static str {
        "clipboard"
    }

    async fn start(&mut self, callback: Callback<String>) -> Result<(), ProviderError> {
        if self.poller.is_some() {
            return Err(ProviderError::AlreadyStarted);
        }
        let probe = ClipboardProbe {
            command: self.command.clone(),
            label: self.command.join(" "),
            format: self.format.clone(),
        };
        self.poller = Some(Poller::spawn(self.name(), probe, self.interval, callback));
        Ok(())
    }

    async fn stop(&mut self) {
        super::stop_poller(&mut self.poller).await;
    }
}

#[cfg(test)]
#[path = "clipboard_tests.rs"]
mod tests;
