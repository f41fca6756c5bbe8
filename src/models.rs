//! Domain models that mirror the `books` table and get passed between the
//! storage layer, the catalog helpers and the TUI. These stay plain data
//! holders so the other layers can focus on presentation and persistence.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One cataloged book as stored in the database.
pub struct Book {
    /// Primary key from SQLite. AUTOINCREMENT guarantees ids are never reused,
    /// even after the row is deleted.
    pub id: i64,
    /// Unique, case-sensitive key for the record. Delete flows address books
    /// by title rather than id.
    pub title: String,
    pub author: String,
    /// Free-form genre; empty when the user left it blank.
    pub genre: String,
    /// Publication year. Storage accepts any integer; the add form is what
    /// keeps it inside the plausible range.
    pub year: i64,
    /// Whether the user has finished reading the book.
    pub read_status: bool,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// User-supplied fields for a book that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i64,
    pub read_status: bool,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = year;
        self
    }

    pub fn with_read_status(mut self, read: bool) -> Self {
        self.read_status = read;
        self
    }

    /// Attach the id assigned by SQLite, turning the input into a full record.
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            year: self.year,
            read_status: self.read_status,
        }
    }
}
