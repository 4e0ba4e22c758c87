//! Error types for onchange
//!
//! Uses `thiserror` for library errors; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for onchange operations
pub type OnchangeResult<T> = Result<T, OnchangeError>;

/// Main error type for onchange operations
#[derive(Error, Debug)]
pub enum OnchangeError {
    /// Interval string does not end in a recognized unit suffix
    #[error("unknown interval: {0}")]
    UnknownInterval(String),

    /// Interval numeric prefix is not a positive integer
    #[error("invalid interval '{value}': expected a positive integer count of ms or ns")]
    InvalidInterval { value: String },

    /// Command line is empty or whitespace-only
    #[error("command is required")]
    EmptyCommand,

    /// Failed to register a directory with the notification source
    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        source: notify::Error,
    },

    /// Notification source failed (setup or runtime delivery)
    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// Failed to launch the managed command
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    /// Failed to kill the managed process (anything other than "already finished")
    #[error("failed to kill process {pid}: {source}")]
    Kill { pid: u32, source: std::io::Error },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
