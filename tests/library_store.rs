//! Integration tests for the on-disk book store.

#![allow(clippy::expect_used)]

use library_manager::{filter_books, Library, LibraryError, LibraryStats, NewBook, ValidationError};
use rusqlite::Connection;
use tempfile::TempDir;

/// Helper to create an initialized library in a fresh directory.
fn create_test_library() -> (Library, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let library = Library::new(temp_dir.path().join("data").join("library.db"));
    library.initialize().expect("Failed to initialize library");
    (library, temp_dir)
}

#[test]
fn test_initialize_creates_directory_and_empty_table() {
    let (library, _temp) = create_test_library();

    assert!(library.path().exists());
    assert!(library.list_all().expect("list_all failed").is_empty());

    // A second start must not disturb anything.
    library.initialize().expect("re-initialize failed");
}

#[test]
fn test_add_then_list_round_trip() {
    let (library, _temp) = create_test_library();

    let stored = library
        .add(
            NewBook::new("Dune", "Frank Herbert")
                .with_genre("Science Fiction")
                .with_year(1965)
                .with_read_status(true),
        )
        .expect("add failed");

    let books = library.list_all().expect("list_all failed");
    assert_eq!(books, vec![stored]);
    assert_eq!(books[0].genre, "Science Fiction");
    assert_eq!(books[0].year, 1965);
    assert!(books[0].read_status);
}

#[test]
fn test_duplicate_title_rejected_and_table_unchanged() {
    let (library, _temp) = create_test_library();
    library
        .add(NewBook::new("Dune", "Frank Herbert").with_year(1965))
        .expect("first add failed");

    let err = library
        .add(NewBook::new("Dune", "Someone Else").with_year(2000))
        .expect_err("duplicate should fail");
    assert!(matches!(err, LibraryError::DuplicateTitle { ref title } if title == "Dune"));

    let books = library.list_all().expect("list_all failed");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].author, "Frank Herbert");

    // The connection used by the failed add was released: the file accepts
    // further writes.
    library
        .add(NewBook::new("Emma", "Jane Austen").with_year(1815))
        .expect("add after duplicate failed");
    assert_eq!(library.list_all().expect("list_all failed").len(), 2);
}

#[test]
fn test_blank_fields_rejected() {
    let (library, _temp) = create_test_library();

    let err = library
        .add(NewBook::new("   ", "Frank Herbert"))
        .expect_err("blank title should fail");
    assert!(matches!(
        err,
        LibraryError::Validation(ValidationError::MissingTitle)
    ));

    let err = library
        .add(NewBook::new("Dune", ""))
        .expect_err("blank author should fail");
    assert!(matches!(
        err,
        LibraryError::Validation(ValidationError::MissingAuthor)
    ));

    assert!(library.list_all().expect("list_all failed").is_empty());
}

#[test]
fn test_delete_by_title_is_exact_and_idempotent() {
    let (library, _temp) = create_test_library();
    library
        .add(NewBook::new("Dune", "Frank Herbert").with_year(1965))
        .expect("add failed");
    library
        .add(NewBook::new("Dune Messiah", "Frank Herbert").with_year(1969))
        .expect("add failed");

    assert_eq!(library.delete_by_title("dune").expect("delete failed"), 0);
    assert_eq!(library.delete_by_title("Dune").expect("delete failed"), 1);
    assert_eq!(library.delete_by_title("Dune").expect("delete failed"), 0);

    let titles: Vec<_> = library
        .list_all()
        .expect("list_all failed")
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, vec!["Dune Messiah"]);
}

#[test]
fn test_search_and_stats_over_stored_books() {
    let (library, _temp) = create_test_library();
    for (title, author, read) in [
        ("Dune", "Frank Herbert", true),
        ("The Hobbit", "J.R.R. Tolkien", false),
        ("Emma", "Jane Austen", true),
        ("Beloved", "Toni Morrison", false),
    ] {
        library
            .add(
                NewBook::new(title, author)
                    .with_year(1950)
                    .with_read_status(read),
            )
            .expect("add failed");
    }

    let books = library.list_all().expect("list_all failed");
    let hits = filter_books(&books, "TOLK");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "The Hobbit");

    let stats = LibraryStats::from_books(&books);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.read, 2);
    assert_eq!(format!("{:.2}", stats.read_percentage), "50.00");
}

#[test]
fn test_rows_with_null_columns_still_load() {
    let (library, _temp) = create_test_library();

    let conn = Connection::open(library.path()).expect("open failed");
    conn.execute(
        "INSERT INTO books (title, author) VALUES ('Untitled Notes', 'Anonymous')",
        [],
    )
    .expect("raw insert failed");
    drop(conn);

    let books = library.list_all().expect("list_all failed");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].genre, "");
    assert_eq!(books[0].year, 0);
    assert!(!books[0].read_status);
}
