// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Attempt identity, stages, and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic identifier for one run of the two-stage pipeline.
///
/// Ids are handed out by the pipeline that owns the counter; they order
/// attempts and correlate log lines, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptId(pub u64);

impl AttemptId {
    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attempt-{}", self.0)
    }
}

/// The two stages of an attempt, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Generate,
    Upload,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::Generate, Stage::Upload];
}

crate::simple_display! {
    Stage {
        Generate => "generate",
        Upload => "upload",
    }
}

/// How an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Both stages exited zero
    Succeeded,
    /// The named stage failed; later stages never ran
    Failed { stage: Stage },
    /// A newer trigger stopped this attempt
    Superseded,
}

impl AttemptOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed { stage } => write!(f, "failed at {stage}"),
            Self::Superseded => f.write_str("superseded"),
        }
    }
}

#[cfg(test)]
#[path = "attempt_tests.rs"]
mod tests;
