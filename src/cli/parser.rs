//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::{MAX_YEAR, MIN_YEAR};

use super::output::OutputFormat;

/// Personal book library manager.
///
/// Without a subcommand the terminal UI is launched. The subcommands run a
/// single operation against the same database and print the result.
#[derive(Parser, Debug)]
#[command(name = "library-manager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite library file.
    ///
    /// Defaults to `library.db` in the current directory.
    #[arg(long = "db", env = "LIBRARY_DB", global = true)]
    pub db_path: Option<PathBuf>,

    /// Write logs to this file instead of the default location.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for subcommands.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Whether this invocation should open the terminal UI.
    pub fn launches_tui(&self) -> bool {
        self.command.is_none()
    }
}

/// Scriptable operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every book.
    #[command(alias = "ls")]
    List,

    /// Add a book.
    Add {
        /// Book title (must be unique).
        #[arg(short, long)]
        title: String,

        /// Author name.
        #[arg(short, long)]
        author: String,

        /// Genre (optional).
        #[arg(short, long, default_value = "")]
        genre: String,

        /// Publication year.
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(MIN_YEAR..=MAX_YEAR))]
        year: i64,

        /// Mark the book as read.
        #[arg(long)]
        read: bool,
    },

    /// Print books whose title or author contains the query.
    Search {
        /// Case-insensitive text to look for.
        query: String,
    },

    /// Delete every book with exactly this title.
    #[command(alias = "rm")]
    Delete {
        /// Exact, case-sensitive title. Surrounding whitespace is ignored,
        /// as it is for `add`.
        title: String,
    },

    /// Print the total count and the share of books read.
    Stats,
}
