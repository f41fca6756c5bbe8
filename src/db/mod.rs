//! Persistence module split across logical submodules.

mod books;
mod connection;

pub use books::{delete_books_by_title, fetch_books, insert_book};
pub use connection::{ensure_schema, Library};
