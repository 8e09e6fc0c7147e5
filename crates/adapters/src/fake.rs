// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory provider driven directly by tests.

use crate::provider::{Callback, Provider, ProviderError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

struct FakeProviderState<T> {
    callback: Option<Callback<T>>,
    started: bool,
    stopped: bool,
    fail_start: bool,
}

/// A provider whose values come from [`FakeProvider::emit`].
///
/// Clones share state, so a test keeps one clone and hands the other to
/// the controller.
pub struct FakeProvider<T> {
    name: &'static str,
    inner: Arc<Mutex<FakeProviderState<T>>>,
}

impl<T> Clone for FakeProvider<T> {
    fn clone(&self) -> Self {
        Self { name: self.name, inner: Arc::clone(&self.inner) }
    }
}

impl<T: Send + 'static> FakeProvider<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(FakeProviderState {
                callback: None,
                started: false,
                stopped: false,
                fail_start: false,
            })),
        }
    }

    /// A provider whose `start` fails
    pub fn failing(name: &'static str) -> Self {
        let fake = Self::new(name);
        fake.inner.lock().fail_start = true;
        fake
    }

    /// Deliver a value through the registered callback.
    ///
    /// Returns false when not started (or already stopped).
    pub fn emit(&self, value: T) -> bool {
        let callback = {
            let inner = self.inner.lock();
            if inner.stopped {
                return false;
            }
            inner.callback.clone()
        };
        match callback {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.inner.lock().started
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.lock().stopped
    }
}

#[async_trait]
impl<T: Send + 'static> Provider for FakeProvider<T> {
    type Item = T;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn start(&mut self, callback: Callback<T>) -> Result<(), ProviderError> {
        let mut inner = self.inner.lock();
        if inner.fail_start {
            return Err(ProviderError::Unsupported("fake provider"));
        }
        if inner.started {
            return Err(ProviderError::AlreadyStarted);
        }
        inner.started = true;
        inner.callback = Some(callback);
        Ok(())
    }

    async fn stop(&mut self) {
        let mut inner = self.inner.lock();
        inner.stopped = true;
        inner.callback = None;
    }
}
