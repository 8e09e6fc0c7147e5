// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle status of a single external process.

use serde::{Deserialize, Serialize};

/// Where a stage process is in its lifecycle.
///
/// `NotStarted → Running → {Succeeded | Failed | Killed}`. The last three
/// are terminal: once reached, the status never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    NotStarted,
    Running,
    /// Exited with code 0
    Succeeded,
    /// Non-zero exit, signal death, spawn error, or unreadable output
    Failed,
    /// Stopped on request; a superseded stage, not an error
    Killed,
}

impl ProcessStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Killed)
    }

    /// Whether a stop request still has something to act on.
    pub fn is_stoppable(self) -> bool {
        matches!(self, Self::NotStarted | Self::Running)
    }
}

crate::simple_display! {
    ProcessStatus {
        NotStarted => "not started",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
        Killed => "killed",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
