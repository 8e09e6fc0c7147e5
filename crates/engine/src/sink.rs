// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Destinations for stage output.

use tandem_core::Stage;

/// Receives each line a stage writes to stdout or stderr.
///
/// Lines arrive without their trailing newline, already decoded (invalid
/// UTF-8 is replaced).
pub trait OutputSink: Send + Sync {
    fn line(&self, stage: Stage, line: &str);
}

/// Forwards stage output to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl OutputSink for LogSink {
    fn line(&self, stage: Stage, line: &str) {
        tracing::info!(target: "tandem::stage", %stage, "{line}");
    }
}
