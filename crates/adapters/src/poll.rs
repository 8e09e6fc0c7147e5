// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval polling shared by the window, clipboard, and file providers.

use crate::provider::{Callback, ProviderError};
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// One observation attempt.
///
/// `Ok(None)` means "nothing usable right now" (e.g. the focused window
/// is not the target); errors are transient.
#[async_trait]
pub trait Probe: Send + 'static {
    type Item: Clone + PartialEq + Debug + Send + 'static;

    async fn probe(&mut self) -> Result<Option<Self::Item>, ProviderError>;
}

/// A background task that runs a [`Probe`] on an interval and calls back
/// when the observed value changes.
pub struct Poller {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn spawn<P: Probe>(
        name: &'static str,
        probe: P,
        interval: Duration,
        callback: Callback<P::Item>,
    ) -> Self {
        let token = CancellationToken::new();
        let task = tokio::spawn(poll_loop(name, probe, interval, callback, token.clone()));
        Self { token, task: Some(task) }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn stop(&mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "poller task ended abnormally");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn poll_loop<P: Probe>(
    name: &'static str,
    mut probe: P,
    interval: Duration,
    callback: Callback<P::Item>,
    token: CancellationToken,
) {
    tracing::info!(provider = name, interval_ms = interval.as_millis() as u64, "polling started");
    let mut last: Option<P::Item> = None;
    // Repeated identical errors are logged once.
    let mut last_error: Option<String> = None;

    loop {
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = probe.probe() => result,
        };

        match result {
            Ok(Some(value)) => {
                last_error = None;
                if last.as_ref() != Some(&value) {
                    tracing::info!(provider = name, ?value, "new value observed");
                    last = Some(value.clone());
                    callback(value);
                }
            }
            Ok(None) => last_error = None,
            Err(e) => {
                let message = e.to_string();
                if last_error.as_deref() != Some(message.as_str()) {
                    tracing::warn!(provider = name, error = %message, "poll failed");
                    last_error = Some(message);
                }
            }
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
    tracing::info!(provider = name, "polling stopped");
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
