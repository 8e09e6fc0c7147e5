// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tandem-core: domain types shared by the tandem crates

pub mod macros;

pub mod attempt;
pub mod command;
pub mod config;
pub mod env;
pub mod event;
pub mod input;
pub mod signal;
pub mod status;
pub mod template;
pub mod trigger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use attempt::{AttemptId, AttemptOutcome, Stage};
pub use command::{RenderedCommand, StageCommand};
pub use config::{
    Config, ConfigError, InputConfig, InputSource, LocatorConfig, NotifyConfig, PipelineConfig,
    StagesConfig, EXAMPLE_CONFIG,
};
pub use event::TriggerEvent;
pub use input::InputFormat;
pub use signal::JobSignal;
pub use status::ProcessStatus;
pub use trigger::{Trigger, TriggerState};
