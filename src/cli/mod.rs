//! Command-line layer: argument parsing, the scriptable subcommands and their
//! text/JSON output.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Command};
