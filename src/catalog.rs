//! Pure helpers over an already-loaded list of books: the search predicate and
//! the statistics line. Nothing here touches the database, so the UI and the
//! CLI can share the exact same behaviour.

use std::fmt;

use serde::Serialize;

use crate::models::Book;

/// Earliest publication year the add form and the CLI accept.
pub const MIN_YEAR: i64 = 1000;
/// Latest publication year the add form and the CLI accept.
pub const MAX_YEAR: i64 = 2025;

/// Whether `year` falls inside the accepted publication range. Storage itself
/// never checks this.
pub fn is_plausible_year(year: i64) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Case-insensitive substring match against the title or the author. An empty
/// query matches every book.
pub fn matches(book: &Book, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
}

/// Keep the books that match `query`, preserving their order. An empty query
/// skips filtering altogether.
pub fn filter_books(books: &[Book], query: &str) -> Vec<Book> {
    if query.is_empty() {
        return books.to_vec();
    }
    books
        .iter()
        .filter(|book| matches(book, query))
        .cloned()
        .collect()
}

/// Counts shown in the statistics line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    pub read_percentage: f64,
}

impl LibraryStats {
    pub fn from_books(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|book| book.read_status).count();
        let read_percentage = if total > 0 {
            read as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            read,
            read_percentage,
        }
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LibraryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Books: {} · Books Read: {} out of {} ({:.2}%)",
            self.total, self.read, self.total, self.read_percentage
        )
    }
}
