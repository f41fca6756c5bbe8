use rusqlite::{ffi, params, Connection, Error as SqlError};
use tracing::{debug, info};

use crate::error::{LibraryError, Result, ValidationError};
use crate::models::{Book, NewBook};

/// Retrieve every book in insertion order. Columns that older tools may have
/// left NULL are coalesced so the row always hydrates into a full `Book`.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, author, COALESCE(genre, ''), COALESCE(year, 0),
                COALESCE(read_status, 0)
         FROM books
         ORDER BY id",
    )?;

    let books = stmt
        .query_map([], |row| {
            Ok(Book {
                id: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                genre: row.get(3)?,
                year: row.get(4)?,
                read_status: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(books)
}

/// Validate and insert a new book. The duplicate check runs inside the same
/// transaction as the insert, and dropping the transaction on any early
/// return rolls it back, so a rejected add never changes the table.
pub fn insert_book(conn: &Connection, book: NewBook) -> Result<Book> {
    validate(&book)?;

    let tx = conn.unchecked_transaction()?;
    let exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM books WHERE title = ?1)",
        params![book.title],
        |row| row.get(0),
    )?;
    if exists {
        debug!(title = %book.title, "rejected duplicate title");
        return Err(LibraryError::DuplicateTitle { title: book.title });
    }

    tx.execute(
        "INSERT INTO books (title, author, genre, year, read_status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            book.title,
            book.author,
            book.genre,
            book.year,
            book.read_status
        ],
    )
    .map_err(|err| map_unique_constraint(err, &book.title))?;

    let id = tx.last_insert_rowid();
    tx.commit()?;

    info!(id, title = %book.title, "book added");
    Ok(book.into_book(id))
}

/// Remove every row whose title matches exactly and report how many went.
pub fn delete_books_by_title(conn: &Connection, title: &str) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM books WHERE title = ?1", params![title])?;
    info!(title, deleted, "deleted books by title");
    Ok(deleted)
}

fn validate(book: &NewBook) -> std::result::Result<(), ValidationError> {
    if book.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if book.author.trim().is_empty() {
        return Err(ValidationError::MissingAuthor);
    }
    Ok(())
}

/// Turn the UNIQUE violation on `books.title` into the typed duplicate error.
/// Only reachable when something else inserted the title between the
/// existence check and the insert.
fn map_unique_constraint(err: SqlError, title: &str) -> LibraryError {
    match err {
        SqlError::SqliteFailure(ref failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            LibraryError::DuplicateTitle {
                title: title.to_string(),
            }
        }
        other => other.into(),
    }
}
