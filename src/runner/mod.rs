//! Debounced restart loop
//!
//! Implements the core of onchange:
//! - Change notifications arm a single pending-restart flag
//! - A fixed-interval tick fires at most one kill-and-relaunch per interval
//! - Process completion feeds back into the loop for logging only

mod event;
mod scheduler;

pub use event::RunnerEvent;
pub use scheduler::run;
