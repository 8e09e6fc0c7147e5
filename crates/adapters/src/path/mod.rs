// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Providers of the target executable path.

mod fixed;
mod focused;

pub use fixed::FixedPathProvider;
pub use focused::{CommandWindowProbe, FocusedWindowProvider, WindowProbe};
