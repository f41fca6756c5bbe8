//! Typed failures for the storage boundary. Callers branch on these: the two
//! recoverable cases become warnings in the UI while everything else aborts
//! the in-flight action.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// A required field was blank.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A book with exactly this title is already stored.
    #[error("\"{title}\" already exists in the library.")]
    DuplicateTitle { title: String },

    #[error("failed to create data directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl LibraryError {
    /// Whether the failure left the table untouched and can simply be shown to
    /// the user as a warning.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LibraryError::Validation(_) | LibraryError::DuplicateTitle { .. }
        )
    }
}

/// Required-field checks applied before anything is written.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Book title is required.")]
    MissingTitle,
    #[error("Author is required.")]
    MissingAuthor,
}
