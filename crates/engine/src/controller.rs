// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Joins the path and input signals and decides when to launch a job.

use crate::pipeline::{JobPipeline, PipelineError};
use std::sync::Arc;
use tandem_adapters::{InputProvider, NotifyAdapter, PathProvider, ProviderError};
use tandem_core::{AttemptId, TriggerEvent, TriggerState};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("failed to start {provider} provider: {source}")]
    Provider {
        provider: &'static str,
        #[source]
        source: ProviderError,
    },
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Cloneable stop switch for a running [`Controller`].
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    shutdown: CancellationToken,
}

impl ControllerHandle {
    /// Ask the controller loop to stop its providers and exit.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

/// Owns the trigger state and is the only caller of [`JobPipeline::run`].
///
/// Providers only enqueue; one loop consumes events in arrival order.
pub struct Controller<N: NotifyAdapter> {
    path_provider: PathProvider,
    input_provider: InputProvider,
    pipeline: JobPipeline<N>,
    state: TriggerState,
    shutdown: CancellationToken,
    tx: mpsc::UnboundedSender<TriggerEvent>,
    rx: mpsc::UnboundedReceiver<TriggerEvent>,
}

impl<N: NotifyAdapter> Controller<N> {
    pub fn new(
        path_provider: PathProvider,
        input_provider: InputProvider,
        pipeline: JobPipeline<N>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            path_provider,
            input_provider,
            pipeline,
            state: TriggerState::new(),
            shutdown: CancellationToken::new(),
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle { shutdown: self.shutdown.clone() }
    }

    pub fn state(&self) -> &TriggerState {
        &self.state
    }

    pub fn pipeline(&self) -> &JobPipeline<N> {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut JobPipeline<N> {
        &mut self.pipeline
    }

    /// Give the pipeline back to the owner, e.g. for a final shutdown.
    pub fn into_pipeline(self) -> JobPipeline<N> {
        self.pipeline
    }

    /// Start both providers and process events until stopped.
    ///
    /// Providers are stopped on every exit path. A running attempt is left
    /// alone; the owner shuts the pipeline down.
    pub async fn run(&mut self) -> Result<(), ControllerError> {
        let result = self.run_loop().await;
        self.path_provider.stop().await;
        self.input_provider.stop().await;
        tracing::info!("controller stopped");
        result
    }

    async fn run_loop(&mut self) -> Result<(), ControllerError> {
        let tx = self.tx.clone();
        let on_path = Arc::new(move |path| enqueue(&tx, TriggerEvent::Path(path)));
        let provider = self.path_provider.name();
        self.path_provider
            .start(on_path)
            .await
            .map_err(|source| ControllerError::Provider { provider, source })?;

        let tx = self.tx.clone();
        let on_input = Arc::new(move |input| enqueue(&tx, TriggerEvent::Input(input)));
        let provider = self.input_provider.name();
        self.input_provider
            .start(on_input)
            .await
            .map_err(|source| ControllerError::Provider { provider, source })?;

        tracing::info!(
            path_provider = self.path_provider.name(),
            input_provider = self.input_provider.name(),
            "controller running"
        );

        loop {
            let event = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                event = self.rx.recv() => event,
            };
            // The controller holds a sender, so the channel never closes
            let Some(event) = event else { break };
            self.handle_event(event).await?;
        }
        Ok(())
    }

    /// Apply one event and launch an attempt if it completes a new trigger.
    pub async fn handle_event(
        &mut self,
        event: TriggerEvent,
    ) -> Result<Option<AttemptId>, ControllerError> {
        let kind = event.kind();
        let changed = self.state.observe(event);
        tracing::debug!(kind, changed, "trigger event");

        let Some(trigger) = self.state.pending() else {
            return Ok(None);
        };
        let attempt = self.pipeline.run(&trigger.path, &trigger.input).await?;
        self.state.mark_dispatched();
        Ok(Some(attempt))
    }
}

fn enqueue(tx: &mpsc::UnboundedSender<TriggerEvent>, event: TriggerEvent) {
    if tx.send(event).is_err() {
        tracing::debug!("controller gone; dropping event");
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
