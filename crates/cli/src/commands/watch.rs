// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tandem watch` - run until interrupted

use anyhow::Result;
use tandem_adapters::factory;
use tandem_core::Config;
use tandem_engine::{Controller, ControllerHandle, JobPipeline};

pub async fn watch(config: &Config) -> Result<()> {
    let path_provider = factory::path_provider(&config.locator)?;
    let input_provider = factory::input_provider(&config.input)?;
    let notifier = factory::notifier(&config.notify);
    tracing::info!(notifier = notifier.name(), "starting");

    let pipeline = JobPipeline::new(config.stages.clone(), &config.pipeline, notifier);
    let mut controller = Controller::new(path_provider, input_provider, pipeline);
    let signals = tokio::spawn(stop_on_signal(controller.handle()));

    let result = controller.run().await;
    signals.abort();

    // The controller leaves any running attempt to us
    let shutdown = controller.into_pipeline().shutdown().await;
    result?;
    shutdown?;
    Ok(())
}

async fn stop_on_signal(handle: ControllerHandle) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("interrupt received"),
        _ = terminate => tracing::info!("terminate received"),
    }
    handle.stop();
}
