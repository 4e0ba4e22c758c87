use std::path::PathBuf;

use clap::Parser;

const LONG_ABOUT: &str = "\
Runs a command. When anything in the watched directory changes, the old \
instance is killed (if still running) and the command is run again. Rapid \
bursts of changes coalesce into a single restart per check interval.";

/// Onchange - file change command runner
#[derive(Parser, Debug)]
#[command(name = "onchange")]
#[command(author, version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Directory to watch
    #[arg(short = 'd', long)]
    pub watch_dir: PathBuf,

    /// Command to run, split on whitespace (no shell quoting)
    #[arg(short = 'c', long)]
    pub command: String,

    /// Comma-separated exclude substrings (.git is always excluded)
    #[arg(short = 'e', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Check interval: integer count with "ms" or "ns" suffix
    #[arg(short = 'i', long, default_value = onchange::DEFAULT_INTERVAL)]
    pub interval: String,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose_log: bool,
}
