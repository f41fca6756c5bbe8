//! Output formatting for CLI commands.

use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::catalog::LibraryStats;
use crate::models::Book;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

pub fn format_books(books: &[Book], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_books_text(books),
        OutputFormat::Json => format_json(&books),
    }
}

fn format_books_text(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books found.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<5} {:<30} {:<22} {:<16} {:<6} Read",
        "ID", "Title", "Author", "Genre", "Year"
    );
    output.push_str(&"-".repeat(86));
    output.push('\n');

    for book in books {
        let _ = writeln!(
            output,
            "{:<5} {:<30} {:<22} {:<16} {:<6} {}",
            book.id,
            truncate(&book.title, 30),
            truncate(&book.author, 22),
            truncate(&book.genre, 16),
            book.year,
            if book.read_status { "yes" } else { "no" }
        );
    }

    output
}

pub fn format_added(book: &Book, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("'{book}' added successfully! (id {})\n", book.id),
        OutputFormat::Json => format_json(book),
    }
}

pub fn format_deleted(title: &str, removed: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if removed == 0 {
                format!("No book titled '{title}' was found.\n")
            } else {
                format!("'{title}' deleted successfully! ({removed} removed)\n")
            }
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Deleted<'a> {
                title: &'a str,
                removed: usize,
            }
            format_json(&Deleted { title, removed })
        }
    }
}

pub fn format_stats(stats: &LibraryStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{stats}\n"),
        OutputFormat::Json => format_json(stats),
    }
}

fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    json.push('\n');
    json
}

/// Shorten `s` to at most `max_len` characters, marking the cut with `...`.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}
