// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tandem_core::{template, JobSignal};
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("failed to start sound player `{player}`: {source}")]
    Player {
        player: String,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter for surfacing job signals to the user
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Surface one job transition. Must not block on user interaction.
    async fn notify(&self, signal: &JobSignal) -> Result<(), NotifyError>;
}

/// Desktop notification adapter using notify-rust.
///
/// On macOS, the first notification makes `mac-notification-sys` look up a
/// bundle identifier through AppleScript, which hangs in processes without
/// Automation permissions. The identifier is set up front to skip it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, signal: &JobSignal) -> Result<(), NotifyError> {
        let title = format!("tandem: {}", signal.title());
        let message = signal.message();
        // show() is synchronous on some platforms; keep it off the runtime.
        tokio::task::spawn_blocking(move || {
            match notify_rust::Notification::new().summary(&title).body(&message).show() {
                Ok(_) => tracing::debug!(%title, "desktop notification sent"),
                Err(e) => tracing::warn!(%title, error = %e, "desktop notification failed"),
            }
        });
        Ok(())
    }
}

/// One sound file and the volume to play it at.
#[derive(Clone, Debug, PartialEq)]
pub struct SoundCue {
    pub file: PathBuf,
    pub volume: f64,
}

impl SoundCue {
    pub fn new(file: impl Into<PathBuf>, volume: f64) -> Self {
        Self { file: file.into(), volume }
    }
}

/// Plays a sound file per signal kind through an external player.
///
/// `${volume}` in the player argv is replaced with the cue's volume and the
/// file is appended last. The player is started and left running; a signal
/// without a configured cue is skipped.
#[derive(Clone, Debug)]
pub struct SoundNotifyAdapter {
    player: Vec<String>,
    start: Option<SoundCue>,
    success: Option<SoundCue>,
    failure: Option<SoundCue>,
}

impl SoundNotifyAdapter {
    pub fn new(
        player: Vec<String>,
        start: Option<SoundCue>,
        success: Option<SoundCue>,
        failure: Option<SoundCue>,
    ) -> Self {
        Self { player, start, success, failure }
    }

    fn cue_for(&self, signal: &JobSignal) -> Option<&SoundCue> {
        match signal {
            JobSignal::Started { .. } => self.start.as_ref(),
            JobSignal::Succeeded { .. } => self.success.as_ref(),
            JobSignal::Failed { .. } => self.failure.as_ref(),
        }
    }

    fn player_args(&self, cue: &SoundCue) -> Vec<String> {
        let volume = format!("{:.2}", cue.volume);
        let vars = HashMap::from([("volume", volume.as_str())]);
        self.player.iter().map(|arg| template::interpolate(arg, &vars)).collect()
    }
}

#[async_trait]
impl NotifyAdapter for SoundNotifyAdapter {
    async fn notify(&self, signal: &JobSignal) -> Result<(), NotifyError> {
        let Some(cue) = self.cue_for(signal) else {
            return Ok(());
        };
        let argv = self.player_args(cue);
        let Some((program, args)) = argv.split_first() else {
            return Err(NotifyError::SendFailed("empty sound player command".to_string()));
        };

        let mut child = tokio::process::Command::new(program)
            .args(args)
            .arg(&cue.file)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|source| NotifyError::Player { player: program.clone(), source })?;

        let kind = signal.kind();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    tracing::warn!(signal = kind, %status, "sound player exited with failure");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(signal = kind, error = %e, "sound player wait failed"),
            }
        });
        Ok(())
    }
}

/// Reports signals as log lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifyAdapter;

#[async_trait]
impl NotifyAdapter for LogNotifyAdapter {
    async fn notify(&self, signal: &JobSignal) -> Result<(), NotifyError> {
        match signal {
            JobSignal::Failed { .. } => {
                tracing::warn!(attempt = %signal.attempt(), "{}", signal.message())
            }
            _ => tracing::info!(attempt = %signal.attempt(), "{}", signal.message()),
        }
        Ok(())
    }
}

/// Discards every signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifyAdapter;

#[async_trait]
impl NotifyAdapter for NoopNotifyAdapter {
    async fn notify(&self, _signal: &JobSignal) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// The notifier selected by configuration.
#[derive(Clone, Debug)]
pub enum Notifier {
    Desktop(DesktopNotifyAdapter),
    Sound(SoundNotifyAdapter),
    Log(LogNotifyAdapter),
    Noop(NoopNotifyAdapter),
}

impl Notifier {
    pub fn name(&self) -> &'static str {
        match self {
            Notifier::Desktop(_) => "desktop",
            Notifier::Sound(_) => "sound",
            Notifier::Log(_) => "log",
            Notifier::Noop(_) => "none",
        }
    }
}

#[async_trait]
impl NotifyAdapter for Notifier {
    async fn notify(&self, signal: &JobSignal) -> Result<(), NotifyError> {
        match self {
            Notifier::Desktop(n) => n.notify(signal).await,
            Notifier::Sound(n) => n.notify(signal).await,
            Notifier::Log(n) => n.notify(signal).await,
            Notifier::Noop(n) => n.notify(signal).await,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{NotifyAdapter, NotifyError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tandem_core::JobSignal;

    /// Recorded notification
    #[derive(Debug, Clone, PartialEq)]
    pub struct NotifyCall {
        pub signal: JobSignal,
        pub title: String,
        pub message: String,
    }

    #[derive(Default)]
    struct FakeNotifyState {
        calls: Vec<NotifyCall>,
        fail: bool,
    }

    /// Fake notification adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeNotifyAdapter {
        inner: Arc<Mutex<FakeNotifyState>>,
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Record calls but report every send as failed
        pub fn failing() -> Self {
            let fake = Self::default();
            fake.inner.lock().fail = true;
            fake
        }

        /// Get all recorded notifications
        pub fn calls(&self) -> Vec<NotifyCall> {
            self.inner.lock().calls.clone()
        }

        /// Just the signals, in order
        pub fn signals(&self) -> Vec<JobSignal> {
            self.inner.lock().calls.iter().map(|c| c.signal).collect()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn notify(&self, signal: &JobSignal) -> Result<(), NotifyError> {
            let mut inner = self.inner.lock();
            inner.calls.push(NotifyCall {
                signal: *signal,
                title: signal.title().to_string(),
                message: signal.message(),
            });
            if inner.fail {
                return Err(NotifyError::SendFailed("fake failure".to_string()));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
