// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tandem-engine: process supervision, the two-stage pipeline, and the
//! controller that decides when to run it

pub mod controller;
pub mod pipeline;
pub mod process;
pub mod sink;

#[cfg(test)]
mod test_helpers;

pub use controller::{Controller, ControllerError, ControllerHandle};
pub use pipeline::{JobPipeline, PipelineError};
pub use process::{ProcessError, ProcessHandle};
pub use sink::{LogSink, OutputSink};
