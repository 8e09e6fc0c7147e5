// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability trait shared by path and input providers.

use crate::subprocess::SubprocessError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors from provider operations.
///
/// Errors raised while polling are transient: the poller logs them and
/// tries again on the next tick. Only `start` errors reach the caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
    #[error("provider already started")]
    AlreadyStarted,
    #[error(transparent)]
    Subprocess(#[from] SubprocessError),
    #[error("`{command}` exited with {code:?}: {stderr}")]
    CommandFailed { command: String, code: Option<i32>, stderr: String },
    #[error("unexpected output from `{command}`: {output}")]
    BadOutput { command: String, output: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Called with each newly observed value.
///
/// Implementations must return quickly: providers call it from their own
/// polling task and never wait on the consumer.
pub type Callback<T> = Arc<dyn Fn(T) + Send + Sync + 'static>;

/// A source of observations that reports changes through a callback.
///
/// `start` registers the callback and begins observing; a provider calls
/// back at most once per detected change and never reentrantly.
#[async_trait]
pub trait Provider: Send {
    type Item: Send + 'static;

    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn start(&mut self, callback: Callback<Self::Item>) -> Result<(), ProviderError>;

    /// Stop observing. Idempotent; safe to call before `start`.
    async fn stop(&mut self);
}

/// Provider of target executable locations.
pub type PathProvider = Box<dyn Provider<Item = PathBuf>>;

/// Provider of validated input data.
pub type InputProvider = Box<dyn Provider<Item = String>>;
