//! Subcommand implementations. Each one performs a single storage round trip
//! and returns the text to print.

use anyhow::Result;

use crate::catalog::{filter_books, LibraryStats};
use crate::db::Library;
use crate::models::NewBook;

use super::output::{format_added, format_books, format_deleted, format_stats, OutputFormat};
use super::parser::Command;

pub fn execute(command: &Command, library: &Library, format: OutputFormat) -> Result<String> {
    match command {
        Command::List => {
            let books = library.list_all()?;
            Ok(format_books(&books, format))
        }
        Command::Add {
            title,
            author,
            genre,
            year,
            read,
        } => {
            let book = library.add(
                NewBook::new(title.trim(), author.trim())
                    .with_genre(genre.trim())
                    .with_year(*year)
                    .with_read_status(*read),
            )?;
            Ok(format_added(&book, format))
        }
        Command::Search { query } => {
            let books = library.list_all()?;
            Ok(format_books(&filter_books(&books, query), format))
        }
        Command::Delete { title } => {
            let title = title.trim();
            let removed = library.delete_by_title(title)?;
            Ok(format_deleted(title, removed, format))
        }
        Command::Stats => {
            let books = library.list_all()?;
            Ok(format_stats(&LibraryStats::from_books(&books), format))
        }
    }
}
