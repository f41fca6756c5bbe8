use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

use crate::error::{LibraryError, Result};
use crate::models::{Book, NewBook};

use super::books::{delete_books_by_title, fetch_books, insert_book};

/// Create the `books` table when it is missing. The column layout matches the
/// files written by earlier versions of the tool, so an existing `library.db`
/// opens without any conversion.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT UNIQUE NOT NULL,
            author TEXT NOT NULL,
            genre TEXT,
            year INTEGER,
            read_status INTEGER
        )",
        [],
    )?;
    Ok(())
}

/// Handle to the on-disk library. It only remembers where the database lives:
/// every operation opens its own connection and closes it before returning,
/// so no handle outlives the action that needed it.
#[derive(Debug, Clone)]
pub struct Library {
    path: PathBuf,
}

impl Library {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure the data directory and the table exist. Safe to call on every
    /// start; existing rows are never touched.
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| LibraryError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        self.with_connection(ensure_schema)
    }

    /// Every stored book in insertion order.
    pub fn list_all(&self) -> Result<Vec<Book>> {
        self.with_connection(fetch_books)
    }

    /// Insert one book, returning the stored record with its new id.
    pub fn add(&self, book: NewBook) -> Result<Book> {
        self.with_connection(|conn| insert_book(conn, book))
    }

    /// Remove every book with exactly this title. Zero removals is a success.
    pub fn delete_by_title(&self, title: &str) -> Result<usize> {
        self.with_connection(|conn| delete_books_by_title(conn, title))
    }

    /// Open a connection, run `op` against it, then release it. On success the
    /// connection is closed explicitly so close failures surface; on failure
    /// it is dropped, which closes it as well.
    fn with_connection<T>(&self, op: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = Connection::open(&self.path)?;
        debug!(path = %self.path.display(), "opened library database");

        let value = op(&conn)?;

        conn.close().map_err(|(_, err)| err)?;
        debug!(path = %self.path.display(), "closed library database");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO books (title, author, genre, year, read_status)
             VALUES ('Dune', 'Frank Herbert', '', 1965, 0)",
            [],
        )
        .unwrap();

        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn initialize_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("shelf").join("library.db");
        let library = Library::new(&path);

        library.initialize().unwrap();

        assert!(path.exists());
        assert!(library.list_all().unwrap().is_empty());
    }
}
