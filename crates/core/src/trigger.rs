// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger coalescing: decides when a (path, input) pair deserves a job.

use crate::event::TriggerEvent;
use std::path::PathBuf;

/// The pair a job runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub path: PathBuf,
    pub input: String,
}

/// Latest known value of each input plus whether the current input has
/// already been handed to the pipeline.
///
/// Invariant: `dispatched` is only set by [`mark_dispatched`] right after a
/// launch, and is cleared whenever `latest_input` changes value. A path
/// change alone never re-arms a dispatched input.
///
/// [`mark_dispatched`]: TriggerState::mark_dispatched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerState {
    latest_path: Option<PathBuf>,
    latest_input: Option<String>,
    dispatched: bool,
}

impl TriggerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event. Returns true if the event changed stored state.
    pub fn observe(&mut self, event: TriggerEvent) -> bool {
        match event {
            TriggerEvent::Path(path) => {
                if self.latest_path.as_ref() == Some(&path) {
                    return false;
                }
                self.latest_path = Some(path);
                true
            }
            TriggerEvent::Input(input) => {
                if self.latest_input.as_ref() == Some(&input) {
                    return false;
                }
                self.latest_input = Some(input);
                self.dispatched = false;
                true
            }
        }
    }

    /// The trigger to launch, if both values are known and the input has
    /// not been dispatched yet.
    pub fn pending(&self) -> Option<Trigger> {
        if self.dispatched {
            return None;
        }
        match (&self.latest_path, &self.latest_input) {
            (Some(path), Some(input)) => Some(Trigger { path: path.clone(), input: input.clone() }),
            _ => None,
        }
    }

    pub fn mark_dispatched(&mut self) {
        self.dispatched = true;
    }

    pub fn latest_path(&self) -> Option<&PathBuf> {
        self.latest_path.as_ref()
    }

    pub fn latest_input(&self) -> Option<&str> {
        self.latest_input.as_deref()
    }

    pub fn is_dispatched(&self) -> bool {
        self.dispatched
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
