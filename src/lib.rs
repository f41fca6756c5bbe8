//! Core library surface for the personal book library manager.
//!
//! The `bin` target drives either the Ratatui front-end or a one-shot
//! subcommand; both go through the same `Library` store.
pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Storage handle plus the schema bootstrap.
pub use db::{ensure_schema, Library};

pub use catalog::{filter_books, matches, LibraryStats};
pub use error::{LibraryError, Result, ValidationError};
pub use models::{Book, NewBook};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
