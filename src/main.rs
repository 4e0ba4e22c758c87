//! Onchange CLI - file change command runner
//!
//! Usage: onchange -d <DIR> -c <COMMAND> [-e <PATTERNS>] [-i <INTERVAL>] [-v]
//!
//! Watches a directory tree and restarts the command whenever something in
//! it changes, coalescing bursts of changes into one restart per interval.

use anyhow::Result;
use clap::Parser;

use onchange::{RunnerConfig, RunnerEvent};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose_log;

    if verbose {
        eprintln!("debug: verbose logging enabled");
    }

    let config = RunnerConfig::new(cli.watch_dir, cli.command, &cli.interval, cli.exclude)?;
    if verbose {
        eprintln!("debug: starting: {config:?}");
    }

    onchange::run(config, shutdown_signal(), move |event| {
        render_event(&event, verbose)
    })
    .await?;

    Ok(())
}

/// Resolves when Ctrl+C is received; the runner observes it in its multi-way
/// wait and shuts the managed process down cleanly.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Render a runner event to the terminal.
///
/// Info goes to stdout, errors to stderr; debug-class trace is only shown
/// with --verbose-log.
fn render_event(event: &RunnerEvent, verbose: bool) {
    match event {
        RunnerEvent::Started {
            watch_dir,
            command,
            directories,
        } => {
            println!("watching {watch_dir} ({directories} directories), command: {command}");
        }
        RunnerEvent::Restarting { command } => {
            println!("running command: {command}");
        }
        RunnerEvent::Shutdown => {
            println!("shutting down");
        }
        RunnerEvent::ProcessFailed { message } => {
            eprintln!("error: {message}");
        }
        RunnerEvent::Watching { path } if verbose => {
            eprintln!("debug: watching {path}");
        }
        RunnerEvent::Skipped { description } if verbose => {
            eprintln!("debug: skipping {description}");
        }
        RunnerEvent::Changed { description } if verbose => {
            eprintln!("debug: got event: {description}");
        }
        RunnerEvent::Killing { pid } if verbose => {
            eprintln!("debug: killing current process (pid {pid})");
        }
        RunnerEvent::Exited { code } if verbose => {
            eprintln!("debug: process exited (code {code:?})");
        }
        RunnerEvent::ProcessKilled if verbose => {
            eprintln!("debug: process killed during restart");
        }
        _ => {}
    }
}
