// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Handlers return `ExitError` instead of calling `std::process::exit()`,
//! so `main()` owns termination and destructors (log flushing) still run.

use std::fmt;

/// A stage failed or the command could not do its job
pub const EXIT_FAILURE: i32 = 1;
/// The supplied input was rejected before anything ran
pub const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(EXIT_FAILURE, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INVALID_INPUT, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}

/// Exit code and stderr message for a command error.
pub fn exit_code(err: &anyhow::Error) -> (i32, String) {
    match err.downcast_ref::<ExitError>() {
        Some(exit) => (exit.code, exit.message.clone()),
        None => (EXIT_FAILURE, format!("{err:#}")),
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
