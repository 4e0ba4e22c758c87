//! Watch registration
//!
//! Walks the target directory once at startup and registers every
//! non-excluded directory with the notification source, non-recursively.
//! Directories created after startup are not picked up; a restart of the
//! tool is needed to watch them.

use std::path::Path;

use notify::{RecursiveMode, Watcher};
use walkdir::WalkDir;

use crate::error::{OnchangeError, OnchangeResult};
use crate::filter::ExcludeFilter;
use crate::runner::RunnerEvent;

/// Register `root` and all non-excluded subdirectories with `watcher`.
///
/// Emits a debug [`RunnerEvent::Watching`] per registered directory and
/// returns how many were registered. Unreadable directories and registration
/// failures are fatal.
pub fn register_tree<W, F>(
    watcher: &mut W,
    root: &Path,
    filter: &ExcludeFilter,
    on_event: &F,
) -> OnchangeResult<usize>
where
    W: Watcher,
    F: Fn(RunnerEvent),
{
    let mut registered = 0;

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| OnchangeError::Io(e.into()))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if filter.is_excluded(&path.display().to_string()) {
            continue;
        }

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| OnchangeError::Watch {
                path: path.to_path_buf(),
                source,
            })?;
        on_event(RunnerEvent::Watching {
            path: path.display().to_string(),
        });
        registered += 1;
    }

    // The root itself is always watched, even when a pattern matches it.
    watcher
        .watch(root, RecursiveMode::NonRecursive)
        .map_err(|source| OnchangeError::Watch {
            path: root.to_path_buf(),
            source,
        })?;

    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::RecommendedWatcher;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    fn noop_watcher() -> RecommendedWatcher {
        RecommendedWatcher::new(
            |_message: Result<notify::Event, notify::Error>| {},
            notify::Config::default(),
        )
        .unwrap()
    }

    fn watched_paths(events: &[RunnerEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                RunnerEvent::Watching { path } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    fn run_registrar(root: &Path, filter: &ExcludeFilter) -> (usize, Vec<String>) {
        let mut watcher = noop_watcher();
        let events: Arc<Mutex<Vec<RunnerEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        let registered = register_tree(&mut watcher, root, filter, &move |event| {
            events_clone.lock().unwrap().push(event);
        })
        .unwrap();

        let paths = watched_paths(&events.lock().unwrap());
        (registered, paths)
    }

    #[test]
    fn registers_root_and_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        fs::write(dir.path().join("src/file.txt"), "x").unwrap();

        let (registered, paths) = run_registrar(dir.path(), &ExcludeFilter::new([]));

        assert_eq!(registered, 3); // root, src, src/nested
        assert!(paths.iter().any(|p| p.ends_with("src")));
        assert!(paths.iter().any(|p| p.ends_with("nested")));
        // Plain files are never registered
        assert!(!paths.iter().any(|p| p.ends_with("file.txt")));
    }

    #[test]
    fn skips_excluded_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();

        let filter = ExcludeFilter::new(["node_modules".to_string()]);
        let (registered, paths) = run_registrar(dir.path(), &filter);

        assert_eq!(registered, 2); // root and src
        assert!(!paths.iter().any(|p| p.contains(".git")));
        assert!(!paths.iter().any(|p| p.contains("node_modules")));
        assert!(paths.iter().any(|p| p.ends_with("src")));
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut watcher = noop_watcher();

        let result = register_tree(&mut watcher, &missing, &ExcludeFilter::new([]), &|_| {});
        assert!(result.is_err());
    }
}
