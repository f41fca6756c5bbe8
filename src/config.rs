//! Runtime configuration resolved once from the command line.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::cli::Cli;

/// Database file used when neither `--db` nor `LIBRARY_DB` is given. It is
/// resolved against the working directory.
pub const DEFAULT_DB_FILE: &str = "library.db";
/// Log file name placed inside the platform data directory in TUI mode.
const LOG_FILE_NAME: &str = "library-manager.log";

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file. Used by the TUI, which owns the terminal.
    File(PathBuf),
    Stderr,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_target: LogTarget,
    pub verbose: bool,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let db_path = cli
            .db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));

        let log_target = match (&cli.log_file, cli.launches_tui()) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, true) => default_log_path().map_or(LogTarget::Disabled, LogTarget::File),
            (None, false) => LogTarget::Stderr,
        };

        Self {
            db_path,
            log_target,
            verbose: cli.verbose,
        }
    }

    /// Filter used when `RUST_LOG` is not set. Subcommands stay quiet on stderr
    /// unless something goes wrong.
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.log_target == LogTarget::Stderr {
            "warn"
        } else {
            "info"
        }
    }
}

/// Resolve `library-manager.log` inside the user's local data directory.
fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "library-manager").map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}
