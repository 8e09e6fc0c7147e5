// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two-stage job pipeline.
//!
//! Each `run` supersedes the live attempt: both of its stage handles are
//! stopped and its worker is awaited (bounded by `stop_timeout`) before a
//! new attempt is spawned, so attempts never overlap.

use crate::process::ProcessHandle;
use crate::sink::{LogSink, OutputSink};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tandem_adapters::NotifyAdapter;
use tandem_core::{
    AttemptId, AttemptOutcome, JobSignal, PipelineConfig, ProcessStatus, Stage, StagesConfig,
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Errors from pipeline operations
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{attempt} did not stop within {}ms", .timeout.as_millis())]
    StuckWorker { attempt: AttemptId, timeout: Duration },
    #[error("stages.{stage}.command is empty")]
    EmptyCommand { stage: Stage },
}

struct JobAttempt {
    id: AttemptId,
    generate: Arc<ProcessHandle>,
    upload: Arc<ProcessHandle>,
    worker: JoinHandle<AttemptOutcome>,
}

impl JobAttempt {
    fn handle(&self, stage: Stage) -> &ProcessHandle {
        match stage {
            Stage::Generate => &self.generate,
            Stage::Upload => &self.upload,
        }
    }
}

/// Runs generate-then-upload attempts, one at a time.
///
/// `run` takes `&mut self`: a pipeline has a single driver.
pub struct JobPipeline<N: NotifyAdapter> {
    stages: StagesConfig,
    stop_timeout: Duration,
    notifier: N,
    sink: Arc<dyn OutputSink>,
    next_id: AttemptId,
    current: Option<JobAttempt>,
}

impl<N: NotifyAdapter> JobPipeline<N> {
    pub fn new(stages: StagesConfig, config: &PipelineConfig, notifier: N) -> Self {
        Self {
            stages,
            stop_timeout: config.stop_timeout(),
            notifier,
            sink: Arc::new(LogSink),
            next_id: AttemptId::first(),
            current: None,
        }
    }

    /// Replace the default logging sink for stage output.
    pub fn with_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Supersede the live attempt and start a new one for `(path, input)`.
    pub async fn run(&mut self, path: &Path, input: &str) -> Result<AttemptId, PipelineError> {
        self.stop_current().await?;

        let render = |stage: Stage| {
            self.stages
                .get(stage)
                .render(path, input)
                .map(|command| Arc::new(ProcessHandle::new(stage, command)))
                .ok_or(PipelineError::EmptyCommand { stage })
        };
        let generate = render(Stage::Generate)?;
        let upload = render(Stage::Upload)?;

        let id = self.next_id;
        self.next_id = id.next();

        let span = tracing::info_span!("attempt", attempt = %id);
        let worker = tokio::spawn(
            execute_attempt(
                id,
                Arc::clone(&generate),
                Arc::clone(&upload),
                self.notifier.clone(),
                Arc::clone(&self.sink),
            )
            .instrument(span),
        );
        tracing::info!(attempt = %id, path = %path.display(), "attempt launched");
        self.current = Some(JobAttempt { id, generate, upload, worker });
        Ok(id)
    }

    /// Wait for the live attempt to finish on its own.
    ///
    /// Consumes the attempt: afterwards there is nothing current. `None` if
    /// there was no attempt or its worker panicked.
    pub async fn wait(&mut self) -> Option<AttemptOutcome> {
        let attempt = self.current.take()?;
        match attempt.worker.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(attempt = %attempt.id, error = %e, "attempt worker failed");
                None
            }
        }
    }

    /// Stop the live attempt, if any, before the owner exits.
    pub async fn shutdown(&mut self) -> Result<Option<AttemptOutcome>, PipelineError> {
        self.stop_current().await
    }

    pub fn current_attempt(&self) -> Option<AttemptId> {
        self.current.as_ref().map(|a| a.id)
    }

    /// True while the live attempt's worker is still running.
    pub fn is_busy(&self) -> bool {
        self.current.as_ref().is_some_and(|a| !a.worker.is_finished())
    }

    pub fn stage_status(&self, stage: Stage) -> Option<ProcessStatus> {
        self.current.as_ref().map(|a| a.handle(stage).status())
    }

    async fn stop_current(&mut self) -> Result<Option<AttemptOutcome>, PipelineError> {
        let Some(mut attempt) = self.current.take() else {
            return Ok(None);
        };
        // Stop both regardless of state; a not-yet-started upload must
        // never run once its attempt is superseded.
        attempt.generate.stop();
        attempt.upload.stop();

        match tokio::time::timeout(self.stop_timeout, &mut attempt.worker).await {
            Ok(Ok(outcome)) => {
                tracing::debug!(attempt = %attempt.id, %outcome, "previous attempt stopped");
                Ok(Some(outcome))
            }
            Ok(Err(e)) => {
                tracing::error!(attempt = %attempt.id, error = %e, "attempt worker failed");
                Ok(None)
            }
            Err(_) => {
                attempt.worker.abort();
                tracing::error!(
                    attempt = %attempt.id,
                    timeout_ms = self.stop_timeout.as_millis() as u64,
                    "previous attempt did not stop"
                );
                Err(PipelineError::StuckWorker { attempt: attempt.id, timeout: self.stop_timeout })
            }
        }
    }
}

async fn execute_attempt<N: NotifyAdapter>(
    id: AttemptId,
    generate: Arc<ProcessHandle>,
    upload: Arc<ProcessHandle>,
    notifier: N,
    sink: Arc<dyn OutputSink>,
) -> AttemptOutcome {
    signal(&notifier, JobSignal::Started { attempt: id }).await;

    for handle in [&generate, &upload] {
        let stage = handle.stage();
        let result = handle
            .start(sink.as_ref())
            .instrument(tracing::info_span!("stage", %stage))
            .await;

        match result {
            Ok(ProcessStatus::Succeeded) => continue,
            Ok(ProcessStatus::Killed) => {
                tracing::info!(%stage, "attempt superseded");
                return AttemptOutcome::Superseded;
            }
            Ok(status) => tracing::warn!(%stage, %status, "stage failed"),
            Err(_) if handle.status() == ProcessStatus::Killed => {
                tracing::info!(%stage, "attempt superseded");
                return AttemptOutcome::Superseded;
            }
            Err(e) => tracing::warn!(%stage, error = %e, "stage failed"),
        }
        signal(&notifier, JobSignal::Failed { attempt: id, stage }).await;
        return AttemptOutcome::Failed { stage };
    }

    tracing::info!("attempt succeeded");
    signal(&notifier, JobSignal::Succeeded { attempt: id }).await;
    AttemptOutcome::Succeeded
}

async fn signal<N: NotifyAdapter>(notifier: &N, signal: JobSignal) {
    if let Err(e) = notifier.notify(&signal).await {
        tracing::warn!(signal = signal.kind(), error = %e, "notification failed");
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
