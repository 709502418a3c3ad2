//! Error types for Jupyter notebook parsing

use thiserror::Error;

/// Error type for notebook parsing operations
#[derive(Error, Debug)]
pub enum NotebookError {
    /// I/O error when reading notebook file
    #[error("Failed to read notebook file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse notebook JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Structurally valid JSON that is not a notebook (no `cells`, no
    /// `worksheets`)
    #[error("Invalid notebook format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for notebook operations
pub type Result<T> = std::result::Result<T, NotebookError>;
