// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervision of one external stage process.
//!
//! A [`ProcessHandle`] runs its command at most once. Every status change
//! happens under the record mutex, and a `stop` pins `Killed` before the
//! OS process is signalled, so a stopped process never reads as
//! succeeded even if it exited cleanly at the same moment.

use crate::sink::OutputSink;
use parking_lot::Mutex;
use std::io;
use std::process::{ExitStatus, Stdio};
use tandem_core::{ProcessStatus, RenderedCommand, Stage};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

/// Errors from running a stage process
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {stage} output: {source}")]
    Output {
        stage: Stage,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for {stage}: {source}")]
    Wait {
        stage: Stage,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
struct ProcessRecord {
    status: ProcessStatus,
    pid: Option<u32>,
}

/// One run of one stage command.
#[derive(Debug)]
pub struct ProcessHandle {
    stage: Stage,
    command: RenderedCommand,
    record: Mutex<ProcessRecord>,
    kill: CancellationToken,
}

enum Stream {
    Stdout,
    Stderr,
}

enum Event {
    Kill,
    Read(Stream, io::Result<usize>),
}

impl ProcessHandle {
    pub fn new(stage: Stage, command: RenderedCommand) -> Self {
        Self {
            stage,
            command,
            record: Mutex::new(ProcessRecord { status: ProcessStatus::NotStarted, pid: None }),
            kill: CancellationToken::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn command(&self) -> &RenderedCommand {
        &self.command
    }

    pub fn status(&self) -> ProcessStatus {
        self.record.lock().status
    }

    /// OS pid while (or after) running; `None` before spawn.
    pub fn pid(&self) -> Option<u32> {
        self.record.lock().pid
    }

    /// Run the command to completion, forwarding output to `sink`.
    ///
    /// Returns the recorded status without spawning if this handle was
    /// already started or stopped.
    pub async fn start(&self, sink: &dyn OutputSink) -> Result<ProcessStatus, ProcessError> {
        let mut child = {
            let mut record = self.record.lock();
            if record.status != ProcessStatus::NotStarted {
                return Ok(record.status);
            }
            match self.build_command().spawn() {
                Ok(child) => {
                    record.status = ProcessStatus::Running;
                    record.pid = child.id();
                    child
                }
                Err(source) => {
                    record.status = ProcessStatus::Failed;
                    tracing::warn!(
                        stage = %self.stage,
                        program = %self.command.program,
                        error = %source,
                        "spawn failed"
                    );
                    let program = self.command.program.clone();
                    return Err(ProcessError::Spawn { program, source });
                }
            }
        };
        tracing::info!(
            stage = %self.stage,
            pid = ?child.id(),
            argv = ?self.command.argv(),
            "stage started"
        );

        if let Err(source) = self.forward_output(&mut child, sink).await {
            self.finish_faulted(&mut child).await;
            return Err(ProcessError::Output { stage: self.stage, source });
        }

        let exit = match self.wait_or_kill(&mut child).await {
            Ok(exit) => exit,
            Err(source) => {
                self.mark_failed();
                return Err(ProcessError::Wait { stage: self.stage, source });
            }
        };

        let mut record = self.record.lock();
        if record.status != ProcessStatus::Killed {
            record.status =
                if exit.success() { ProcessStatus::Succeeded } else { ProcessStatus::Failed };
        }
        tracing::info!(
            stage = %self.stage,
            exit_code = ?exit.code(),
            status = %record.status,
            "stage exited"
        );
        Ok(record.status)
    }

    /// Pin `Killed` and terminate the process if it is running.
    ///
    /// Returns false when the process had already finished.
    pub fn stop(&self) -> bool {
        let mut record = self.record.lock();
        if !record.status.is_stoppable() {
            return false;
        }
        let was = record.status;
        record.status = ProcessStatus::Killed;
        self.kill.cancel();
        tracing::info!(stage = %self.stage, was = %was, pid = ?record.pid, "stage stopped");
        true
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .envs(self.command.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.command.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Forward both pipes line by line until they close or a kill arrives.
    async fn forward_output(&self, child: &mut Child, sink: &dyn OutputSink) -> io::Result<()> {
        let mut stdout = child.stdout.take().map(BufReader::new);
        let mut stderr = child.stderr.take().map(BufReader::new);
        let mut out_buf = Vec::new();
        let mut err_buf = Vec::new();

        while stdout.is_some() || stderr.is_some() {
            // read_until keeps partial data in the buffer if another branch wins
            let event = tokio::select! {
                biased;
                _ = self.kill.cancelled() => Event::Kill,
                r = read_line(&mut stdout, &mut out_buf) => Event::Read(Stream::Stdout, r),
                r = read_line(&mut stderr, &mut err_buf) => Event::Read(Stream::Stderr, r),
            };

            match event {
                // wait_or_kill sends the signal
                Event::Kill => return Ok(()),
                Event::Read(Stream::Stdout, r) => {
                    self.take_line(r?, &mut stdout, &mut out_buf, sink)
                }
                Event::Read(Stream::Stderr, r) => {
                    self.take_line(r?, &mut stderr, &mut err_buf, sink)
                }
            }
        }
        Ok(())
    }

    /// Reap the child, killing it first if a stop arrives.
    ///
    /// The token is watched here too, since a process may close its pipes
    /// and keep running after `forward_output` returns.
    async fn wait_or_kill(&self, child: &mut Child) -> io::Result<ExitStatus> {
        let exited = tokio::select! {
            biased;
            _ = self.kill.cancelled() => None,
            r = child.wait() => Some(r),
        };
        if let Some(exit) = exited {
            return exit;
        }
        if let Err(e) = child.start_kill() {
            // Already exited; wait() reaps it
            tracing::debug!(stage = %self.stage, error = %e, "kill after exit");
        }
        child.wait().await
    }

    /// Emit a completed line, or the unterminated tail and close on EOF.
    fn take_line<R>(
        &self,
        read: usize,
        reader: &mut Option<R>,
        buf: &mut Vec<u8>,
        sink: &dyn OutputSink,
    ) {
        if read > 0 && !buf.ends_with(b"\n") {
            // EOF mid-line; the next read returns 0
            return;
        }
        if !buf.is_empty() {
            sink.line(self.stage, trim_newline(&String::from_utf8_lossy(&buf[..])));
            buf.clear();
        }
        if read == 0 {
            *reader = None;
        }
    }

    async fn finish_faulted(&self, child: &mut Child) {
        self.mark_failed();
        if let Err(e) = child.start_kill() {
            tracing::debug!(stage = %self.stage, error = %e, "kill after output fault");
        }
        if let Err(e) = child.wait().await {
            tracing::warn!(stage = %self.stage, error = %e, "failed to reap stage process");
        }
    }

    fn mark_failed(&self) {
        let mut record = self.record.lock();
        if record.status != ProcessStatus::Killed {
            record.status = ProcessStatus::Failed;
        }
    }
}

async fn read_line<R: AsyncBufRead + Unpin>(
    reader: &mut Option<R>,
    buf: &mut Vec<u8>,
) -> io::Result<usize> {
    match reader {
        Some(reader) => reader.read_until(b'\n', buf).await,
        None => std::future::pending().await,
    }
}

fn trim_newline(line: &str) -> &str {
    line.strip_suffix('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).unwrap_or(line)
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
