// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events flowing from providers into the controller loop.

use std::path::PathBuf;

/// One observation from a provider, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The target executable was (re)located
    Path(PathBuf),
    /// New, already validated input data
    Input(String),
}

impl TriggerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Input(_) => "input",
        }
    }
}
