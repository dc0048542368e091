//! Error types for contact-book operations.

use thiserror::Error;

/// Error type for contact operations.
#[derive(Error, Debug)]
pub enum ContactError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database error from `SQLite`.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No custom contact with the given id.
    #[error("Contact not found: {0}")]
    NotFound(i64),

    /// Attempted to edit, delete, or flag a built-in contact.
    #[error("Built-in contacts cannot be modified")]
    BuiltInImmutable,

    /// Invalid data provided.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for contact operations.
pub type Result<T> = std::result::Result<T, ContactError>;
