use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use library_manager::cli::{execute, Cli};
use library_manager::config::AppConfig;
use library_manager::{logging, run_app, App, Library};

/// Open the library, then either launch the TUI or run the requested
/// subcommand and print its output.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);
    logging::init(&config)?;
    debug!(?config, "configuration resolved");

    let library = Library::new(&config.db_path);
    library
        .initialize()
        .with_context(|| format!("failed to open library at {}", config.db_path.display()))?;

    let Some(command) = &cli.command else {
        let books = library.list_all().context("failed to load books")?;
        info!(count = books.len(), "starting terminal UI");
        let mut app = App::new(library, books);
        return run_app(&mut app);
    };

    let output = execute(command, &library, cli.format)?;
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
    {
        // A closed pipe (`| head`) is not a failure.
        if err.kind() != io::ErrorKind::BrokenPipe {
            return Err(err).context("failed to write output");
        }
    }
    Ok(())
}
