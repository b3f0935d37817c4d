use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while reading documentation or writing stub files.
#[derive(Error, Debug)]
pub enum DoxstubError {
    /// The documentation index page could not be read. Fatal for the run.
    #[error("failed to read the documentation index: {0}")]
    IndexRead(#[source] std::io::Error),

    /// A single entry's documentation page could not be read. The entry is
    /// skipped; the rest of the run continues.
    #[error("failed to read documentation page {page}: {source}")]
    DocumentRead {
        /// File name of the page that could not be read.
        page: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A fully assembled stub could not be written out.
    #[error("failed to write stub {path}: {source}")]
    StubWrite {
        /// Destination path of the stub file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DoxstubError>;
