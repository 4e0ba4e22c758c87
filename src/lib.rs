//! Onchange - file change command runner
//!
//! Onchange watches a directory tree and keeps a user command running:
//! whenever a qualifying file change arrives, the current instance is killed
//! and a fresh one launched on the next tick of a fixed check interval, so a
//! burst of rapid edits causes at most one restart per interval.

pub mod config;
pub mod error;
pub mod filter;
pub mod process;
pub mod registrar;
pub mod runner;

// Re-exports for convenience
pub use config::{parse_interval, RunnerConfig, DEFAULT_INTERVAL};
pub use error::{OnchangeError, OnchangeResult};
pub use filter::{ExcludeFilter, VCS_METADATA_DIR};
pub use process::{ExitReport, Supervisor};
pub use registrar::register_tree;
pub use runner::{run, RunnerEvent};
