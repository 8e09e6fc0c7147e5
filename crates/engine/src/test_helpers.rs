// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for engine tests.

use crate::sink::OutputSink;
use parking_lot::Mutex;
use std::path::Path;
use std::time::Duration;
use tandem_core::{PipelineConfig, RenderedCommand, Stage, StageCommand, StagesConfig};

/// Sink that keeps every line for later assertions.
#[derive(Default)]
pub(crate) struct CaptureSink {
    lines: Mutex<Vec<(Stage, String)>>,
}

impl CaptureSink {
    pub(crate) fn lines(&self) -> Vec<(Stage, String)> {
        self.lines.lock().clone()
    }

    pub(crate) fn text(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, line)| line.clone()).collect()
    }
}

impl OutputSink for CaptureSink {
    fn line(&self, stage: Stage, line: &str) {
        self.lines.lock().push((stage, line.to_string()));
    }
}

pub(crate) fn sh(script: &str) -> RenderedCommand {
    RenderedCommand::new("sh", ["-c", script])
}

pub(crate) fn sh_stage(script: &str) -> StageCommand {
    StageCommand::new(["sh", "-c", script])
}

pub(crate) fn stages(generate: &str, upload: &str) -> StagesConfig {
    StagesConfig { generate: sh_stage(generate), upload: sh_stage(upload) }
}

pub(crate) fn pipeline_config(stop_timeout_ms: u64) -> PipelineConfig {
    PipelineConfig { stop_timeout_ms }
}

/// Lines of a marker file; empty if it does not exist yet.
pub(crate) fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Poll `check` until it holds, failing the test after five seconds.
pub(crate) async fn wait_until(what: &str, check: impl Fn() -> bool) {
    for _ in 0..500 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {what}");
}
