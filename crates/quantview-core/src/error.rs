//! Error types for viewing and rendering operations.
//!
//! Every failure in the pipeline maps onto one of three recoverable
//! categories (fetch failures, parse failures, unsupported formats)
//! plus plain I/O. All of them are recovered at the view boundary: the
//! caller shows a short message and the process keeps running.

use thiserror::Error;

/// Error types that can occur while fetching, parsing, or rendering a file.
///
/// # Examples
///
/// ```
/// use quantview_core::ViewerError;
///
/// fn describe(err: &ViewerError) -> &'static str {
///     match err {
///         ViewerError::NotFound(_) => "file is gone",
///         ViewerError::PermissionDenied(_) => "no access",
///         ViewerError::Fetch(_) => "storage unavailable",
///         ViewerError::Parse(_) => "file is malformed",
///         ViewerError::UnsupportedFormat(_) => "cannot preview this format",
///         ViewerError::Io(_) => "local I/O failed",
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Object storage could not serve the requested bytes (network or
    /// backend failure). Not retried automatically; the user re-opens the
    /// viewer to retry.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The requested bucket/path does not exist in object storage.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Object storage refused access to the requested path.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Malformed input: invalid notebook JSON, an unrecognized notebook
    /// schema, or empty CSV content.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The file extension is not recognized for inline preview.
    ///
    /// Recognized-but-download-only formats (`.xlsx`, `.parquet`) also
    /// surface through this variant when a preview is requested.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Local file I/O error (reading inputs, writing exported documents).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for [`Result<T, ViewerError>`].
pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let error = ViewerError::Fetch("connection reset".to_string());
        assert_eq!(format!("{error}"), "Fetch error: connection reset");
    }

    #[test]
    fn test_not_found_display() {
        let error = ViewerError::NotFound("models/alpha.ipynb".to_string());
        let display = format!("{error}");
        assert!(display.contains("Not found"));
        assert!(display.contains("alpha.ipynb"));
    }

    #[test]
    fn test_parse_error_display() {
        let error = ViewerError::Parse("expected value at line 1".to_string());
        assert_eq!(format!("{error}"), "Parse error: expected value at line 1");
    }

    #[test]
    fn test_unsupported_format_display() {
        let error = ViewerError::UnsupportedFormat("no inline preview for .parquet".to_string());
        assert!(format!("{error}").contains(".parquet"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ViewerError = io_err.into();

        match err {
            ViewerError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(ViewerError::UnsupportedFormat("xyz".to_string()))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        match outer() {
            Err(ViewerError::UnsupportedFormat(msg)) => assert_eq!(msg, "xyz"),
            _ => panic!("Expected UnsupportedFormat to propagate"),
        }
    }

    #[test]
    fn test_error_size() {
        // Errors should stay small enough to return by value everywhere.
        assert!(
            std::mem::size_of::<ViewerError>() < 256,
            "ViewerError grew past 256 bytes, consider boxing large variants"
        );
    }
}
