//! Error types for the dish catalog.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required setting (environment variable or flag) is absent.
    #[error("missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    /// The PDF could not be parsed or its text extracted.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Any catalog store failure other than an absorbed duplicate.
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the store rejected a write because the name already exists.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Error::Store(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
