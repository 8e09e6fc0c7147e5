// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Focused-window detection.
//!
//! A [`WindowProbe`] answers "which executable owns the focused window";
//! [`FocusedWindowProvider`] polls it and reports executables whose path
//! contains the configured match (case-insensitive).

use crate::poll::{Poller, Probe};
use crate::provider::{Callback, Provider, ProviderError};
use crate::subprocess::{run_with_timeout, PROBE_TIMEOUT};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Source of the focused window's executable.
#[async_trait]
pub trait WindowProbe: Send + 'static {
    /// `Ok(None)` when nothing is focused or the owner cannot be resolved.
    async fn focused_executable(&mut self) -> Result<Option<PathBuf>, ProviderError>;
}

/// Resolves the focused window through platform command-line tools.
///
/// - Linux (X11): `xdotool getwindowfocus getwindowpid`, then `/proc/<pid>/exe`
/// - macOS: `osascript` asks System Events for the frontmost pid, then `ps`
/// - Windows: one PowerShell call to `GetForegroundWindow` and
///   `GetWindowThreadProcessId`, then the owning process's image path
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandWindowProbe;

impl CommandWindowProbe {
    /// Fails on platforms with no known probe.
    pub fn for_platform() -> Result<Self, ProviderError> {
        if cfg!(any(target_os = "linux", target_os = "macos", windows)) {
            Ok(Self)
        } else {
            Err(ProviderError::Unsupported("focused window detection"))
        }
    }
}

#[async_trait]
impl WindowProbe for CommandWindowProbe {
    async fn focused_executable(&mut self) -> Result<Option<PathBuf>, ProviderError> {
        focused_executable().await
    }
}

#[cfg(not(windows))]
async fn focused_executable() -> Result<Option<PathBuf>, ProviderError> {
    let Some(pid) = focused_pid().await? else {
        return Ok(None);
    };
    executable_for_pid(pid).await
}

#[cfg(windows)]
const FOREGROUND_EXE_SCRIPT: &str = concat!(
    "Add-Type -Namespace Tandem -Name User32 -MemberDefinition '",
    "[DllImport(\"user32.dll\")] public static extern IntPtr GetForegroundWindow();",
    "[DllImport(\"user32.dll\")] public static extern uint GetWindowThreadProcessId(IntPtr hWnd, out uint pid);';",
    "$p = 0;",
    "[void][Tandem.User32]::GetWindowThreadProcessId([Tandem.User32]::GetForegroundWindow(), [ref]$p);",
    "if ($p -ne 0) { (Get-Process -Id $p -ErrorAction SilentlyContinue).Path }",
);

#[cfg(windows)]
async fn focused_executable() -> Result<Option<PathBuf>, ProviderError> {
    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-NonInteractive", "-Command", FOREGROUND_EXE_SCRIPT]);
    let output = run_with_timeout(cmd, PROBE_TIMEOUT, "powershell").await?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(parse_path(&String::from_utf8_lossy(&output.stdout)))
}

#[cfg(target_os = "macos")]
async fn focused_pid() -> Result<Option<u32>, ProviderError> {
    let mut cmd = Command::new("osascript");
    cmd.args([
        "-e",
        "tell application \"System Events\" to get unix id of first process whose frontmost is true",
    ]);
    run_for_pid(cmd, "osascript").await
}

#[cfg(not(any(target_os = "macos", windows)))]
async fn focused_pid() -> Result<Option<u32>, ProviderError> {
    let mut cmd = Command::new("xdotool");
    cmd.args(["getwindowfocus", "getwindowpid"]);
    run_for_pid(cmd, "xdotool").await
}

#[cfg(not(windows))]
async fn run_for_pid(cmd: Command, label: &str) -> Result<Option<u32>, ProviderError> {
    let output = run_with_timeout(cmd, PROBE_TIMEOUT, label).await?;
    if !output.status.success() {
        // No focused window, or one without a _NET_WM_PID
        tracing::trace!(
            command = label,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "no focused pid"
        );
        return Ok(None);
    }
    parse_pid(label, &String::from_utf8_lossy(&output.stdout)).map(Some)
}

#[cfg_attr(windows, allow(dead_code))]
pub(crate) fn parse_pid(label: &str, stdout: &str) -> Result<u32, ProviderError> {
    let trimmed = stdout.trim();
    trimmed
        .parse()
        .map_err(|_| ProviderError::BadOutput { command: label.to_string(), output: trimmed.to_string() })
}

#[cfg(target_os = "macos")]
async fn executable_for_pid(pid: u32) -> Result<Option<PathBuf>, ProviderError> {
    let mut cmd = Command::new("ps");
    cmd.args(["-o", "comm=", "-p", &pid.to_string()]);
    let output = run_with_timeout(cmd, PROBE_TIMEOUT, "ps").await?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(parse_path(&String::from_utf8_lossy(&output.stdout)))
}

#[cfg(not(any(target_os = "macos", windows)))]
async fn executable_for_pid(pid: u32) -> Result<Option<PathBuf>, ProviderError> {
    let link = format!("/proc/{pid}/exe");
    match tokio::fs::read_link(&link).await {
        Ok(path) => Ok(Some(path)),
        // Process exited between the two probes
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ProviderError::Io { path: link, source }),
    }
}

/// First non-empty line of a command's stdout, as a path.
#[cfg_attr(not(any(target_os = "macos", windows)), allow(dead_code))]
pub(crate) fn parse_path(stdout: &str) -> Option<PathBuf> {
    stdout.lines().map(str::trim).find(|line| !line.is_empty()).map(PathBuf::from)
}

/// Case-insensitive substring match on an executable path.
pub(crate) fn matches_target(path: &std::path::Path, needle_lower: &str) -> bool {
    path.to_string_lossy().to_lowercase().contains(needle_lower)
}

struct FocusProbe<W> {
    window: W,
    needle: String,
}

#[async_trait]
impl<W: WindowProbe> Probe for FocusProbe<W> {
    type Item = PathBuf;

    async fn probe(&mut self) -> Result<Option<PathBuf>, ProviderError> {
        let found = self.window.focused_executable().await?;
        Ok(found.filter(|path| matches_target(path, &self.needle)))
    }
}

/// Polls the focused window and emits matching executables on change.
pub struct FocusedWindowProvider<W: WindowProbe = CommandWindowProbe> {
    window: Option<W>,
    needle: String,
    interval: Duration,
    poller: Option<Poller>,
}

impl<W: WindowProbe> FocusedWindowProvider<W> {
    pub fn new(window: W, pattern: &str, interval: Duration) -> Self {
        Self { window: Some(window), needle: pattern.to_lowercase(), interval, poller: None }
    }
}

#[async_trait]
impl<W: WindowProbe> Provider for FocusedWindowProvider<W> {
    type Item = PathBuf;

    fn name(&self) -> &'static str {
        "focused_window"
    }

    async fn start(&mut self, callback: Callback<PathBuf>) -> Result<(), ProviderError> {
        let window = self.window.take().ok_or(ProviderError::AlreadyStarted)?;
        let probe = FocusProbe { window, needle: self.needle.clone() };
        self.poller = Some(Poller::spawn(self.name(), probe, self.interval, callback));
        Ok(())
    }

    async fn stop(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop().await;
        }
    }
}

#[cfg(test)]
#[path = "focused_tests.rs"]
mod tests;
