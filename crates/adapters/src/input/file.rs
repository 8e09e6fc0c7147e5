// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::poll::{Poller, Probe};
use crate::provider::{Callback, Provider, ProviderError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tandem_core::InputFormat;

/// Polls a file's contents for well-formed input.
///
/// A missing file counts as "no input yet", not an error.
pub struct FilePollProvider {
    path: PathBuf,
    format: InputFormat,
    interval: Duration,
    poller: Option<Poller>,
}

impl FilePollProvider {
    pub fn new(path: impl Into<PathBuf>, format: InputFormat, interval: Duration) -> Self {
        Self { path: path.into(), format, interval, poller: None }
    }
}

struct FileProbe {
    path: PathBuf,
    format: InputFormat,
}

#[async_trait]
impl Probe for FileProbe {
    type Item = String;

    async fn probe(&mut self) -> Result<Option<String>, ProviderError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(self.format.sanitize(&raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => {
                Err(ProviderError::Io { path: self.path.display().to_string(), source })
            }
        }
    }
}

#[async_trait]
impl Provider for FilePollProvider {
    type Item = String;

    fn name(&self) -> &'static str {
        "file"
    }

    async fn start(&mut self, callback: Callback<String>) -> Result<(), ProviderError> {
        if self.poller.is_some() {
            return Err(ProviderError::AlreadyStarted);
        }
        let probe = FileProbe { path: self.path.clone(), format: self.format.clone() };
        self.poller = Some(Poller::spawn(self.name(), probe, self.interval, callback));
        Ok(())
    }

    async fn stop(&mut self) {
        super::stop_poller(&mut self.poller).await;
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
