//! The debounced restart loop
//!
//! One sequential decision loop consumes four event sources through a single
//! multi-way wait: change notifications, the fixed-interval tick, process
//! completion reports, and the shutdown signal. Change notifications only arm
//! the pending-restart flag; the tick handler is the only place a restart
//! fires, so bursts of edits coalesce into at most one restart per interval.

use std::future::Future;
use std::process::ExitStatus;

use notify::{RecommendedWatcher, Watcher as _};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::RunnerConfig;
use crate::error::OnchangeResult;
use crate::process::{ExitReport, Supervisor};
use crate::registrar;

use super::event::{describe, is_metadata_only, PendingRestart, RunnerEvent};

/// Watch `config.watch_dir` and keep `config.command` running, restarting it
/// on the first tick after a qualifying change.
///
/// Runs until `shutdown` resolves (clean exit) or a fatal error occurs:
/// notification-source failure, launch failure, or a kill failure that is not
/// "process already finished". Completion of the managed process is reported
/// through `on_event` only; it never stops the loop.
pub async fn run<S, F>(config: RunnerConfig, shutdown: S, on_event: F) -> OnchangeResult<()>
where
    S: Future<Output = ()>,
    F: Fn(RunnerEvent),
{
    let (change_tx, mut change_rx) = mpsc::unbounded_channel();
    let mut watcher = RecommendedWatcher::new(
        move |message: Result<notify::Event, notify::Error>| {
            let _ = change_tx.send(message);
        },
        notify::Config::default(),
    )?;

    let directories =
        registrar::register_tree(&mut watcher, &config.watch_dir, &config.filter, &on_event)?;
    on_event(RunnerEvent::Started {
        watch_dir: config.watch_dir.display().to_string(),
        command: config.command.clone(),
        directories,
    });

    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut supervisor = Supervisor::new(done_tx);

    // Pre-armed: the command launches on the first tick without a file change.
    let mut pending = PendingRestart::armed();

    // First tick one full interval after start, then every interval. Delay
    // rather than burst on a stalled loop: at most one restart per interval.
    let mut ticker = time::interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(message) = change_rx.recv() => match message {
                Ok(event) => {
                    let description = describe(&event);
                    if is_metadata_only(&event.kind) || config.filter.is_excluded(&description) {
                        on_event(RunnerEvent::Skipped { description });
                    } else {
                        on_event(RunnerEvent::Changed { description });
                        pending.arm();
                    }
                }
                // Notification-source failure terminates the run.
                Err(e) => return Err(e.into()),
            },
            _ = ticker.tick() => {
                if pending.take() {
                    on_event(RunnerEvent::Restarting { command: config.command.clone() });
                    if let Some(pid) = supervisor.current_pid() {
                        on_event(RunnerEvent::Killing { pid });
                    }
                    // Kill must fully complete before the new launch; changes
                    // arriving meanwhile wait in the channel for the next tick.
                    supervisor.kill_current().await?;
                    supervisor.start_new(&config.command)?;
                }
            }
            Some(report) = done_rx.recv() => on_event(completion_event(report)),
            _ = &mut shutdown => {
                supervisor.kill_current().await?;
                on_event(RunnerEvent::Shutdown);
                return Ok(());
            }
        }
    }
}

/// Map a completion report to its log event. Forced kills are expected and
/// classified as benign, never as process failures.
fn completion_event(report: ExitReport) -> RunnerEvent {
    match report {
        ExitReport::Killed => RunnerEvent::ProcessKilled,
        ExitReport::Exited(status) if status.success() => RunnerEvent::Exited {
            code: status.code(),
        },
        ExitReport::Exited(status) if killed_by_signal(&status) => RunnerEvent::ProcessKilled,
        ExitReport::Exited(status) => RunnerEvent::ProcessFailed {
            message: format!("command exited with {status}"),
        },
        ExitReport::WaitFailed(message) => RunnerEvent::ProcessFailed { message },
    }
}

#[cfg(unix)]
fn killed_by_signal(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    // SIGKILL; what the supervisor sends on restart
    status.signal() == Some(9)
}

#[cfg(not(unix))]
fn killed_by_signal(_status: &ExitStatus) -> bool {
    false
}
