//! Pseudo-terminal process runner.
//!
//! The build command runs attached to a PTY so that the output formatter
//! keeps its terminal-only rendering. Blocking reads happen on a dedicated
//! thread that forwards raw chunks over a bounded channel; lines are
//! assembled, recorded and handed to the caller on the async side.

use async_trait::async_trait;
use nix::errno::Errno;
use portable_pty::{native_pty_system, Child, CommandBuilder, PtySize};
use std::fmt::Display;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::errors::{RunnerError, RunnerResult};
use crate::domain::models::{CapturedRun, ExitStatus, OutputLog};
use crate::domain::ports::{LineSink, ProcessRunner};

const READ_BUFFER_SIZE: usize = 4096;
const CHANNEL_CAPACITY: usize = 256;

/// PTY runner configuration.
#[derive(Debug, Clone)]
pub struct PtyConfig {
    /// Shell that interprets the command string (`<shell> -c <command>`)
    pub shell: String,
    /// Working directory for the child; the current directory when unset
    pub working_dir: Option<PathBuf>,
    /// Terminal width
    pub cols: u16,
    /// Terminal height
    pub rows: u16,
}

impl Default for PtyConfig {
    fn default() -> Self {
        Self {
            shell: "bash".to_string(),
            working_dir: None,
            cols: 120,
            rows: 40,
        }
    }
}

impl PtyConfig {
    #[must_use]
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

enum ReadEvent {
    Data(Vec<u8>),
    Eof,
    Failed(io::Error),
}

/// Runs one command at a time under a pseudo-terminal.
pub struct PtyProcessRunner {
    config: PtyConfig,
    busy: AtomicBool,
    /// Child pid while a run is active, 0 otherwise
    active_pid: AtomicU32,
}

/// Clears the runner's busy flag and pid however the run ends.
struct ActiveRun<'a> {
    runner: &'a PtyProcessRunner,
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        self.runner.active_pid.store(0, Ordering::SeqCst);
        self.runner.busy.store(false, Ordering::SeqCst);
    }
}

impl PtyProcessRunner {
    pub const fn new(config: PtyConfig) -> Self {
        Self {
            config,
            busy: AtomicBool::new(false),
            active_pid: AtomicU32::new(0),
        }
    }

    /// Process id of the child currently being supervised.
    pub fn active_pid(&self) -> Option<u32> {
        match self.active_pid.load(Ordering::SeqCst) {
            0 => None,
            pid => Some(pid),
        }
    }

    fn claim(&self) -> RunnerResult<ActiveRun<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| RunnerError::AlreadyRunning)?;
        Ok(ActiveRun { runner: self })
    }

    fn command_builder(&self, command: &str) -> io::Result<CommandBuilder> {
        let mut builder = CommandBuilder::new(&self.config.shell);
        builder.arg("-c");
        builder.arg(command);

        let cwd = match self.config.working_dir {
            Some(ref dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        builder.cwd(cwd);
        builder.env("TERM", "xterm-256color");
        Ok(builder)
    }

    async fn supervise(&self, command: &str, on_line: LineSink<'_>) -> RunnerResult<CapturedRun> {
        let pair = native_pty_system()
            .openpty(PtySize {
                rows: self.config.rows,
                cols: self.config.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| RunnerError::PtyAllocation(e.to_string()))?;

        let spawn_error = |reason: String| RunnerError::Spawn {
            command: command.to_string(),
            reason,
        };
        let builder = self
            .command_builder(command)
            .map_err(|e| spawn_error(e.to_string()))?;
        let mut child = pair
            .slave
            .spawn_command(builder)
            .map_err(|e| spawn_error(e.to_string()))?;

        // Only the child holds the slave from here on, so the master sees
        // end-of-stream as soon as the child goes away.
        drop(pair.slave);

        let pid = child.process_id();
        if let Some(pid) = pid {
            self.active_pid.store(pid, Ordering::SeqCst);
        }
        debug!(?pid, "child spawned");

        let mut log = OutputLog::new();
        let captured = attach_output(pair.master.try_clone_reader(), &mut log, on_line).await;

        if let Err(err) = captured {
            if let Err(kill_err) = child.kill() {
                debug!(error = %kill_err, "child already gone");
            }
            wait_for_exit(child).await;
            return Err(err);
        }

        let exit_status = wait_for_exit(child).await;
        drop(pair.master);

        Ok(CapturedRun {
            log,
            exit_status,
            pid,
        })
    }
}

#[async_trait]
impl ProcessRunner for PtyProcessRunner {
    fn name(&self) -> &'static str {
        "pty"
    }

    async fn run(&self, command: &str, on_line: LineSink<'_>) -> RunnerResult<CapturedRun> {
        if command.trim().is_empty() {
            return Err(RunnerError::EmptyCommand);
        }
        let _active = self.claim()?;

        info!("Running: \n{command}");
        self.supervise(command, on_line).await
    }
}

/// Capture output from the PTY reader, or nothing if the child exited first.
async fn attach_output<E: Display>(
    reader: Result<Box<dyn Read + Send>, E>,
    log: &mut OutputLog,
    on_line: LineSink<'_>,
) -> RunnerResult<()> {
    match reader {
        Ok(reader) => capture_output(reader, log, on_line).await,
        Err(e) => {
            info!(error = %e, "The child process exited before its output could be attached");
            Ok(())
        }
    }
}

/// A PTY master reports EIO once every slave descriptor is closed.
fn is_hangup(err: &io::Error) -> bool {
    err.raw_os_error() == Some(Errno::EIO as i32)
}

/// Drain the PTY until end-of-stream, recording and forwarding every line.
async fn capture_output(
    reader: Box<dyn Read + Send>,
    log: &mut OutputLog,
    on_line: LineSink<'_>,
) -> RunnerResult<()> {
    let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
    let reader_task = tokio::task::spawn_blocking(move || read_loop(reader, &tx));

    let mut lines = LineAssembler::default();
    let mut outcome = Ok(());

    while let Some(event) = rx.recv().await {
        match event {
            ReadEvent::Data(chunk) => {
                for raw in lines.feed(&chunk) {
                    forward(log, on_line, &raw);
                }
            }
            ReadEvent::Eof => break,
            ReadEvent::Failed(err) if is_hangup(&err) => {
                warn!(error = %err, "PTY read failed, did the process finish giving output?");
                break;
            }
            ReadEvent::Failed(err) => {
                outcome = Err(RunnerError::OutputRead(err));
                break;
            }
        }
    }

    if let Some(raw) = lines.finish() {
        forward(log, on_line, &raw);
    }

    reader_task
        .await
        .map_err(|e| RunnerError::ReaderTask(e.to_string()))?;
    outcome
}

fn forward(log: &mut OutputLog, on_line: LineSink<'_>, raw: &str) {
    if let Some(line) = log.record(raw) {
        on_line(line);
    }
}

fn read_loop(mut reader: Box<dyn Read + Send>, tx: &mpsc::Sender<ReadEvent>) {
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        let event = match reader.read(&mut buf) {
            Ok(0) => ReadEvent::Eof,
            Ok(n) => ReadEvent::Data(buf[..n].to_vec()),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => ReadEvent::Failed(err),
        };
        let finished = !matches!(event, ReadEvent::Data(_));

        if tx.blocking_send(event).is_err() || finished {
            break;
        }
    }
}

/// Block until the child exits; a failed status lookup yields `Unknown`.
async fn wait_for_exit(mut child: Box<dyn Child + Send + Sync>) -> ExitStatus {
    match tokio::task::spawn_blocking(move || child.wait()).await {
        Ok(Ok(status)) => {
            ExitStatus::Known(i32::try_from(status.exit_code()).unwrap_or(i32::MAX))
        }
        Ok(Err(err)) => {
            warn!(error = %err, "Unable to collect child exit status");
            ExitStatus::Unknown
        }
        Err(err) => {
            warn!(error = %err, "Exit status task failed");
            ExitStatus::Unknown
        }
    }
}

/// Splits a byte stream into lines, carrying partial lines across chunks.
#[derive(Debug, Default)]
struct LineAssembler {
    partial: Vec<u8>,
}

impl LineAssembler {
    fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut completed = Vec::new();
        for &byte in chunk {
            if byte == b'\n' {
                let raw = std::mem::take(&mut self.partial);
                completed.push(String::from_utf8_lossy(&raw).into_owned());
            } else {
                self.partial.push(byte);
            }
        }
        completed
    }

    fn finish(&mut self) -> Option<String> {
        if self.partial.is_empty() {
            return None;
        }
        let raw = std::mem::take(&mut self.partial);
        Some(String::from_utf8_lossy(&raw).into_owned())
    }
}
