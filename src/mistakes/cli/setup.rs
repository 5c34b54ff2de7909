//! Argument parsing and logging setup for the binary.
//!
//! Log filtering, highest priority first:
//!
//! 1. `MISTAKES_LOG` (e.g. `mistakes=debug`)
//! 2. `RUST_LOG`
//! 3. `--verbose` (debug for this crate), otherwise `warn`
//!
//! Logs go to stderr so they never interleave with the menu on stdout.

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MISTAKES_LOG";

#[derive(Parser, Debug)]
#[command(name = "mistakes", version)]
#[command(about = "Keep a journal of your mistakes and how to fix them", long_about = None)]
pub struct Cli {
    /// Path to the data file (default: mistakes.json in the user data directory)
    #[arg(long, env = "MISTAKES_FILE", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Directory for timestamped backups (default: backups/ next to the data file)
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

pub fn init_logging(verbose: bool, no_color: bool) {
    let use_ansi = !no_color && std::io::stderr().is_terminal();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(verbose)
        .without_time()
        .compact();

    // A second initialisation (only possible in tests) is ignored.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(fmt_layer)
        .try_init();
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if verbose {
        EnvFilter::new("mistakes=debug,warn")
    } else {
        EnvFilter::new("warn")
    }
}

/// Turns colours off when asked to or when stdout is not a terminal.
pub fn init_colors(no_color: bool) {
    if no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_paths_and_flags() {
        let cli = Cli::try_parse_from([
            "mistakes",
            "--data-file",
            "/tmp/m.json",
            "--backup-dir",
            "/tmp/b",
            "-v",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/m.json")));
        assert_eq!(cli.backup_dir, Some(PathBuf::from("/tmp/b")));
        assert!(cli.verbose);
        assert!(cli.no_color);
    }
}
