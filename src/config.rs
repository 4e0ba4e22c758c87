//! Runner configuration
//!
//! Immutable configuration produced once at startup from validated CLI input.
//! Interval strings follow the original tool's format: an integer count
//! suffixed with `ms` or `ns` (`"1000ms"`, `"250ns"`). Anything else is a
//! configuration error reported before the watch loop starts.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{OnchangeError, OnchangeResult};
use crate::filter::ExcludeFilter;

/// Default check interval when `--interval` is not given.
pub const DEFAULT_INTERVAL: &str = "1000ms";

/// Validated, immutable runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Root directory to watch; may be relative or absolute.
    pub watch_dir: PathBuf,
    /// Raw command line, split on whitespace at launch time (no quoting).
    pub command: String,
    /// Cadence at which the pending-restart flag is checked.
    pub interval: Duration,
    /// Exclusion patterns, `.git` always included.
    pub filter: ExcludeFilter,
}

impl RunnerConfig {
    /// Validate inputs and build the configuration.
    ///
    /// Fails on an unparseable interval or a whitespace-only command; missing
    /// flags are rejected earlier by the CLI layer.
    pub fn new(
        watch_dir: PathBuf,
        command: String,
        interval: &str,
        excludes: Vec<String>,
    ) -> OnchangeResult<Self> {
        if command.split_whitespace().next().is_none() {
            return Err(OnchangeError::EmptyCommand);
        }

        Ok(Self {
            watch_dir,
            command,
            interval: parse_interval(interval)?,
            filter: ExcludeFilter::new(excludes),
        })
    }
}

/// Parse an interval string: integer count + `ms`/`ns` suffix.
///
/// The count must be positive; a zero interval would spin the tick loop.
pub fn parse_interval(value: &str) -> OnchangeResult<Duration> {
    let (count, from_count): (&str, fn(u64) -> Duration) =
        if let Some(count) = value.strip_suffix("ms") {
            (count, Duration::from_millis)
        } else if let Some(count) = value.strip_suffix("ns") {
            (count, Duration::from_nanos)
        } else {
            return Err(OnchangeError::UnknownInterval(value.to_string()));
        };

    match count.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(from_count(n)),
        _ => Err(OnchangeError::InvalidInterval {
            value: value.to_string(),
        }),
    }
}
