//! Subprocess supervisor
//!
//! Owns at most one running child process at a time. Each launched child is
//! handed to a detached monitor task that blocks on its exit and reports an
//! [`ExitReport`] back into the scheduler's done channel; the supervisor keeps
//! only a kill handle. Killing therefore never races the completion await:
//! the monitor task is the single owner of the `Child`.

use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};

use crate::error::{OnchangeError, OnchangeResult};

/// Completion report for a launched process, used for logging only.
#[derive(Debug)]
pub enum ExitReport {
    /// The process exited on its own.
    Exited(ExitStatus),
    /// The process was killed by the supervisor during a restart.
    Killed,
    /// Waiting on the process failed.
    WaitFailed(String),
}

/// Kill request sent to a monitor task; the inner sender acknowledges the
/// kill result once the process has been reaped.
type KillRequest = oneshot::Sender<io::Result<()>>;

struct ProcessHandle {
    pid: u32,
    kill_tx: oneshot::Sender<KillRequest>,
}

/// Supervises the single managed child process.
pub struct Supervisor {
    current: Option<ProcessHandle>,
    done_tx: mpsc::UnboundedSender<ExitReport>,
}

impl Supervisor {
    /// Create a supervisor reporting completions on `done_tx`.
    pub fn new(done_tx: mpsc::UnboundedSender<ExitReport>) -> Self {
        Self {
            current: None,
            done_tx,
        }
    }

    /// Whether a process handle is currently tracked.
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Pid of the tracked process, if any.
    pub fn current_pid(&self) -> Option<u32> {
        self.current.as_ref().map(|h| h.pid)
    }

    /// Kill the tracked process, if any, and wait for it to be reaped.
    ///
    /// A process that already exited on its own is not an error: the monitor
    /// task may be gone, or the kill may report "already finished"; both are
    /// swallowed. Any other kill failure is fatal and propagates.
    pub async fn kill_current(&mut self) -> OnchangeResult<()> {
        let Some(handle) = self.current.take() else {
            return Ok(());
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        if handle.kill_tx.send(ack_tx).is_err() {
            // Monitor task already finished: the process exited on its own.
            return Ok(());
        }

        match ack_rx.await {
            Ok(result) => classify_kill_result(result, handle.pid),
            // Monitor dropped the ack without sending; the process is gone.
            Err(_) => Ok(()),
        }
    }

    /// Split `command_line` on whitespace and launch it.
    ///
    /// No shell quoting: arguments containing spaces are not representable.
    /// The child's stdout is wired to ours; stdin and stderr are not. Returns
    /// right after the OS-level spawn; completion is reported asynchronously
    /// by the monitor task.
    pub fn start_new(&mut self, command_line: &str) -> OnchangeResult<()> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next().ok_or(OnchangeError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| OnchangeError::Launch {
                command: command_line.to_string(),
                source,
            })?;

        let pid = child.id().unwrap_or_default();
        let (kill_tx, kill_rx) = oneshot::channel();
        tokio::spawn(monitor(child, kill_rx, self.done_tx.clone()));

        self.current = Some(ProcessHandle { pid, kill_tx });
        Ok(())
    }
}

/// Await the child's exit or a kill request, whichever comes first.
///
/// One monitor task exists per launched process; it is the sole owner of the
/// `Child` handle and always reports exactly one `ExitReport`.
async fn monitor(
    mut child: Child,
    kill_rx: oneshot::Receiver<KillRequest>,
    done_tx: mpsc::UnboundedSender<ExitReport>,
) {
    tokio::select! {
        status = child.wait() => {
            let _ = done_tx.send(wait_report(status));
        }
        request = kill_rx => match request {
            Ok(ack) => {
                // kill() signals and reaps; ack only after the process is gone
                let result = child.kill().await;
                let _ = done_tx.send(ExitReport::Killed);
                let _ = ack.send(result);
            }
            Err(_) => {
                // Supervisor dropped the handle without killing; keep reaping.
                let status = child.wait().await;
                let _ = done_tx.send(wait_report(status));
            }
        },
    }
}

fn wait_report(status: io::Result<ExitStatus>) -> ExitReport {
    match status {
        Ok(status) => ExitReport::Exited(status),
        Err(e) => ExitReport::WaitFailed(e.to_string()),
    }
}

/// Distinguish the benign "process already finished" kill failure from fatal
/// ones. Tokio reports a kill on an exited process as `InvalidInput`.
fn classify_kill_result(result: io::Result<()>, pid: u32) -> OnchangeResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(()),
        Err(source) => Err(OnchangeError::Kill { pid, source }),
    }
}
