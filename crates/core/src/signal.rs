// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fire-and-forget job transition signals for notifiers.

use crate::attempt::{AttemptId, Stage};
use serde::{Deserialize, Serialize};

/// A job transition worth telling the user about.
///
/// Supersession deliberately has no signal: a replaced attempt ends
/// silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum JobSignal {
    Started { attempt: AttemptId },
    Failed { attempt: AttemptId, stage: Stage },
    Succeeded { attempt: AttemptId },
}

impl JobSignal {
    pub fn attempt(&self) -> AttemptId {
        match self {
            Self::Started { attempt } | Self::Failed { attempt, .. } | Self::Succeeded { attempt } => {
                *attempt
            }
        }
    }

    /// Short machine-friendly name ("started", "failed", "succeeded").
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Failed { .. } => "failed",
            Self::Succeeded { .. } => "succeeded",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Started { .. } => "Job started",
            Self::Failed { .. } => "Job failed",
            Self::Succeeded { .. } => "Job finished",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Started { attempt } => format!("{attempt}: running generate stage"),
            Self::Failed { attempt, stage } => format!("{attempt}: {stage} stage failed"),
            Self::Succeeded { attempt } => format!("{attempt}: generate and upload succeeded"),
        }
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
