//! Error types for backend account operations.

use thiserror::Error;

/// Error type for account operations.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Transport-level failure reaching the backend.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request.
    ///
    /// The message is the backend's own wording (e.g. "Invalid
    /// credentials") and is shown to the user verbatim, so the display
    /// form is the message alone.
    #[error("{message}")]
    Rejected {
        /// HTTP status of the rejection.
        status: u16,
        /// Backend-provided message.
        message: String,
    },
}

impl AccountError {
    /// Returns whether this is a backend rejection (as opposed to a
    /// transport failure).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Result type alias for account operations.
pub type Result<T> = std::result::Result<T, AccountError>;
