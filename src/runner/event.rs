//! Runner event types and debounce state

use notify::event::{Event, EventKind, ModifyKind};

/// Events emitted by the runner for the injected logging collaborator.
///
/// The scheduler never prints; the binary decides how to render these,
/// honoring the configured verbosity (debug-class events are only shown with
/// `--verbose-log`).
#[derive(Debug, Clone)]
pub enum RunnerEvent {
    /// Watch registration finished and the loop is running.
    Started {
        watch_dir: String,
        command: String,
        directories: usize,
    },
    /// A directory was registered with the notification source (debug).
    Watching { path: String },
    /// A change event was ignored: metadata-only or excluded (debug).
    Skipped { description: String },
    /// A qualifying change armed the pending-restart flag (debug).
    Changed { description: String },
    /// The pending flag fired: killing the old process, starting anew (info).
    Restarting { command: String },
    /// The previous process is being killed (debug).
    Killing { pid: u32 },
    /// The managed process exited cleanly on its own (debug).
    Exited { code: Option<i32> },
    /// The managed process was killed during a restart; expected (debug).
    ProcessKilled,
    /// The managed process failed: non-zero exit or wait error (error).
    ProcessFailed { message: String },
    /// The runner is shutting down (info).
    Shutdown,
}

/// The single pending-restart bit.
///
/// All mutation happens on the scheduler's sequential event loop: change
/// notifications arrive over a channel consumed by the same loop that runs
/// the tick handler, so `arm` can never interleave with the tick path's
/// check-and-clear. A change arriving while a restart is in flight stays
/// queued in the channel and arms the flag for the next tick.
#[derive(Debug)]
pub(crate) struct PendingRestart {
    armed: bool,
}

impl PendingRestart {
    /// Start armed so the command launches on the first tick, before any
    /// file change.
    pub(crate) fn armed() -> Self {
        Self { armed: true }
    }

    pub(crate) fn arm(&mut self) {
        self.armed = true;
    }

    /// Read and clear in one step; the tick handler acts iff this is true.
    pub(crate) fn take(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }
}

/// Stringified form of a change event: every path plus the operation kind.
///
/// This is what the exclusion filter runs against, so a pattern can match
/// either a path component or (in principle) the kind text.
pub(crate) fn describe(event: &Event) -> String {
    let paths = event
        .paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{paths} ({:?})", event.kind)
}

/// True for events that only report attribute/metadata or access changes.
///
/// These never indicate edited content and must not arm the restart flag.
pub(crate) fn is_metadata_only(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Metadata(_)) | EventKind::Access(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind, RenameMode};
    use std::path::PathBuf;

    #[test]
    fn pending_restart_starts_armed() {
        let mut pending = PendingRestart::armed();
        assert!(pending.take());
        assert!(!pending.take());
    }

    #[test]
    fn take_clears_until_rearmed() {
        let mut pending = PendingRestart::armed();
        assert!(pending.take());
        assert!(!pending.take());
        pending.arm();
        assert!(pending.take());
        assert!(!pending.take());
    }

    #[test]
    fn many_arms_coalesce_into_one_take() {
        let mut pending = PendingRestart::armed();
        pending.take();
        for _ in 0..100 {
            pending.arm();
        }
        assert!(pending.take());
        assert!(!pending.take());
    }

    #[test]
    fn metadata_and_access_events_are_metadata_only() {
        assert!(is_metadata_only(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::Permissions
        ))));
        assert!(is_metadata_only(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::Any
        ))));
        assert!(is_metadata_only(&EventKind::Access(AccessKind::Any)));
    }

    #[test]
    fn content_events_are_not_metadata_only() {
        assert!(!is_metadata_only(&EventKind::Create(CreateKind::File)));
        assert!(!is_metadata_only(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
        assert!(!is_metadata_only(&EventKind::Modify(ModifyKind::Name(
            RenameMode::Any
        ))));
        assert!(!is_metadata_only(&EventKind::Remove(RemoveKind::File)));
        assert!(!is_metadata_only(&EventKind::Any));
    }

    #[test]
    fn description_contains_every_path() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/tmp/proj/a.txt"))
            .add_path(PathBuf::from("/tmp/proj/b.txt"));
        let description = describe(&event);
        assert!(description.contains("/tmp/proj/a.txt"));
        assert!(description.contains("/tmp/proj/b.txt"));
        assert!(description.contains("Create"));
    }
}
