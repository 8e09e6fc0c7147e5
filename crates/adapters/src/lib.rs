// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tandem-adapters: the outside world behind small traits
//!
//! Path and input providers feed the controller through [`Provider`];
//! notifiers surface job transitions through [`NotifyAdapter`].

pub mod factory;
pub mod input;
pub mod notify;
pub mod path;
pub mod poll;
pub mod provider;
pub mod subprocess;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use factory::{input_provider, notifier, path_provider, FactoryError};
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProvider;
pub use input::{default_clipboard_command, ClipboardProvider, FilePollProvider};
pub use notify::{
    DesktopNotifyAdapter, LogNotifyAdapter, NoopNotifyAdapter, NotifyAdapter, NotifyError,
    Notifier, SoundCue, SoundNotifyAdapter,
};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
pub use path::{CommandWindowProbe, FixedPathProvider, FocusedWindowProvider, WindowProbe};
pub use provider::{Callback, InputProvider, PathProvider, Provider, ProviderError};
