//! Error types for the splitbook library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for splitbook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while splitting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Error from the underlying PDF library.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The document has no pages to split.
    #[error("Document has no pages")]
    EmptyDocument,

    /// Too few boundaries were detected to split automatically.
    ///
    /// Recoverable: callers should fall back to a fixed-size or manual
    /// partition strategy rather than treat this as a failure.
    #[error("Detected {found} boundaries, need at least {min}")]
    DetectionInsufficient { found: usize, min: usize },

    /// A manual page-range entry could not be parsed.
    #[error("Invalid page range: {0}")]
    RangeParse(String),

    /// A derived or validated range is unusable (empty, reversed, or
    /// entirely past the end of the document).
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DetectionInsufficient { found: 1, min: 2 };
        assert_eq!(err.to_string(), "Detected 1 boundaries, need at least 2");

        let err = Error::PageOutOfRange(120, 100);
        assert_eq!(
            err.to_string(),
            "Page 120 is out of range (document has 100 pages)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
