// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::provider::{Callback, Provider, ProviderError};
use async_trait::async_trait;
use std::path::PathBuf;

/// Emits one configured path when started.
#[derive(Debug, Clone)]
pub struct FixedPathProvider {
    path: PathBuf,
    started: bool,
}

impl FixedPathProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), started: false }
    }
}

#[async_trait]
impl Provider for FixedPathProvider {
    type Item = PathBuf;

    fn name(&self) -> &'static str {
        "fixed_path"
    }

    async fn start(&mut self, callback: Callback<PathBuf>) -> Result<(), ProviderError> {
        if self.started {
            return Err(ProviderError::AlreadyStarted);
        }
        self.started = true;
        tracing::info!(path = %self.path.display(), "using fixed executable path");
        callback(self.path.clone());
        Ok(())
    }

    async fn stop(&mut self) {}
}

#[cfg(test)]
#[path = "fixed_tests.rs"]
mod tests;
