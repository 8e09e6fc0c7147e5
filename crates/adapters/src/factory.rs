// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build providers and notifiers from configuration.

use crate::input::{default_clipboard_command, ClipboardProvider, FilePollProvider};
use crate::notify::{
    DesktopNotifyAdapter, LogNotifyAdapter, NoopNotifyAdapter, Notifier, SoundCue, SoundNotifyAdapter,
};
use crate::path::{CommandWindowProbe, FixedPathProvider, FocusedWindowProvider};
use crate::provider::{InputProvider, PathProvider, ProviderError};
use std::path::PathBuf;
use std::time::Duration;
use tandem_core::{ConfigError, InputConfig, InputSource, LocatorConfig, NotifyConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub fn path_provider(config: &LocatorConfig) -> Result<PathProvider, FactoryError> {
    Ok(match config {
        LocatorConfig::FixedPath { path } => Box::new(FixedPathProvider::new(path.clone())),
        LocatorConfig::FocusedWindow { pattern, poll_interval_ms } => {
            Box::new(FocusedWindowProvider::new(
                CommandWindowProbe::for_platform()?,
                pattern,
                Duration::from_millis(*poll_interval_ms),
            ))
        }
    })
}

pub fn input_provider(config: &InputConfig) -> Result<InputProvider, FactoryError> {
    let format = config.format()?;
    let interval = config.poll_interval();
    Ok(match &config.source {
        InputSource::Clipboard { command } => {
            let command = command.clone().unwrap_or_else(default_clipboard_command);
            Box::new(ClipboardProvider::new(command, format, interval))
        }
        InputSource::File { path } => Box::new(FilePollProvider::new(path.clone(), format, interval)),
    })
}

pub fn notifier(config: &NotifyConfig) -> Notifier {
    match config {
        NotifyConfig::Desktop => Notifier::Desktop(DesktopNotifyAdapter::new()),
        NotifyConfig::Sound {
            player,
            start,
            success,
            failure,
            start_volume,
            success_volume,
            failure_volume,
        } => {
            let cue = |file: &Option<PathBuf>, volume: f64| {
                file.as_ref().map(|f| SoundCue::new(f.clone(), volume))
            };
            Notifier::Sound(SoundNotifyAdapter::new(
                player.clone(),
                cue(start, *start_volume),
                cue(success, *success_volume),
                cue(failure, *failure_volume),
            ))
        }
        NotifyConfig::Log => Notifier::Log(LogNotifyAdapter),
        NotifyConfig::Silent => Notifier::Noop(NoopNotifyAdapter),
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
