// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Providers of validated input data.
//!
//! Both providers poll a raw source, pass it through [`InputFormat`], and
//! report a value only when the sanitized value changes. Malformed data is
//! dropped before it reaches the controller.
//!
//! [`InputFormat`]: tandem_core::InputFormat

mod clipboard;
mod file;

pub use clipboard::{default_clipboard_command, ClipboardProvider};
pub use file::FilePollProvider;

use crate::poll::Poller;

/// Stop an optional running poller.
async fn stop_poller(poller: &mut Option<Poller>) {
    if let Some(mut poller) = poller.take() {
        poller.stop().await;
    }
}
