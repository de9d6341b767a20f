//! Error type for storage operations.

/// Custom error type for storage operations.
///
/// Confirmed absence and an unreachable store are separate variants so
/// callers can retry one and report the other.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The session was never created.
    #[error("Session '{0}' not found")]
    NotFound(String),

    /// The store could not be reached or a query failed.
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    /// A role outside `user` / `assistant`.
    #[error("Invalid message role '{0}' (expected 'user' or 'assistant')")]
    InvalidRole(String),

    /// A status outside `active` / `closed`.
    #[error("Invalid session status '{0}'")]
    InvalidStatus(String),

    /// A stored record that could not be decoded.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Whether this error means the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
